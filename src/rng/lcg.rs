//! Linear congruential uniform generator.

/// A source of uniform 32-bit integers, abstracting over the primary LCG
/// and the legacy alternate formula (see [`super::LegacyRng`], gated
/// behind the `legacy-rng` feature).
pub trait UniformRng {
    /// Raw generator output before the final shift that fills a 32-bit word.
    fn raw(&mut self) -> u32;

    /// A uniform `u32` for Gaussian-shaper dispatch.
    fn uniform_u32(&mut self) -> u32;

    /// A uniform float in `[0, 1)`.
    fn uniform_float(&mut self) -> f32;
}

/// `state <- (state * 1103515245 + 12345) mod 2^31`, observed as
/// `state XOR mask`, left-shifted by one bit to fill a 32-bit word.
#[derive(Debug, Clone, Copy)]
pub struct Lcg31Rng {
    state: u32,
    mask: u32,
}

const RAND_MAX: u32 = 0x7fff_ffff;

impl Lcg31Rng {
    pub fn new(seed: u32, mask: u32) -> Self {
        Self { state: seed, mask }
    }
}

impl UniformRng for Lcg31Rng {
    #[inline]
    fn raw(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12_345) & RAND_MAX;
        self.state ^ self.mask
    }

    #[inline]
    fn uniform_u32(&mut self) -> u32 {
        self.raw() << 1
    }

    #[inline]
    fn uniform_float(&mut self) -> f32 {
        self.raw() as f32 / (RAND_MAX as f32 + 1.0)
    }
}

/// The disabled-by-default legacy formula (`state * 995893231 + 93281`,
/// masked to 15 bits). Kept for byte-for-byte parity with pre-existing
/// log captures; its multiplier fails the Hull-Dobell full-period
/// condition, so it is opt-in only.
#[cfg(feature = "legacy-rng")]
#[derive(Debug, Clone, Copy)]
pub struct LegacyRng {
    state: u32,
    mask: u32,
}

#[cfg(feature = "legacy-rng")]
const LEGACY_RAND_MAX: u32 = 0x7fff;

#[cfg(feature = "legacy-rng")]
impl LegacyRng {
    pub fn new(seed: u32, mask: u32) -> Self {
        Self { state: seed, mask }
    }
}

#[cfg(feature = "legacy-rng")]
impl UniformRng for LegacyRng {
    #[inline]
    fn raw(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(995_893_231).wrapping_add(93_281);
        ((self.state / 65536) & LEGACY_RAND_MAX) ^ self.mask
    }

    #[inline]
    fn uniform_u32(&mut self) -> u32 {
        self.raw() << 17
    }

    #[inline]
    fn uniform_float(&mut self) -> f32 {
        self.raw() as f32 / LEGACY_RAND_MAX as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_for_same_seed() {
        let mut a = Lcg31Rng::new(1, 0);
        let mut b = Lcg31Rng::new(1, 0);
        for _ in 0..100 {
            assert_eq!(a.uniform_u32(), b.uniform_u32());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = Lcg31Rng::new(1, 0);
        let mut b = Lcg31Rng::new(2, 0);
        let seq_a: Vec<u32> = (0..10).map(|_| a.uniform_u32()).collect();
        let seq_b: Vec<u32> = (0..10).map(|_| b.uniform_u32()).collect();
        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn test_uniform_float_is_in_unit_interval() {
        let mut r = Lcg31Rng::new(1, 0);
        for _ in 0..1000 {
            let f = r.uniform_float();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn test_mask_changes_output_without_changing_state_sequence() {
        let mut unmasked = Lcg31Rng::new(1, 0);
        let mut masked = Lcg31Rng::new(1, 0xffff_ffff);
        for _ in 0..10 {
            let a = unmasked.raw();
            let b = masked.raw();
            assert_eq!(a ^ 0xffff_ffff, b);
        }
    }
}
