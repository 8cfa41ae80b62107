//! Root raised cosine interpolating pulse-shaping filter.

use crate::types::{phase_increment, Accumulator, IqSample, Phase, Sample, SAMPLE_MAX};
use std::f64::consts::PI;

pub const NUM_SYMBOLS: usize = 11;
pub const POINTS_PER_SYMBOL: usize = 256;
pub const LUT_SIZE: usize = NUM_SYMBOLS * POINTS_PER_SYMBOL;

/// Polyphase-interleaved layout: for phase `p` and tap `k`, the
/// coefficient lives at `p * PHASE_FACTOR + k * SYMBOL_FACTOR`, chosen so
/// the 11 taps for one phase are contiguous.
const SYMBOL_FACTOR: usize = 1;
const PHASE_FACTOR: usize = NUM_SYMBOLS;

/// Polyphase RRC coefficient table, built once per run and shared by
/// every filter instance with the same roll-off/rate pair.
#[derive(Debug, Clone)]
pub struct RrcLut {
    coeffs: Vec<Sample>,
}

impl RrcLut {
    pub fn build(roll_off: f32) -> Self {
        let roll_off = roll_off as f64;
        let scale = SAMPLE_MAX as f64 / (1.0 + roll_off * (4.0 / PI - 1.0));
        let mid_point = LUT_SIZE as i64 / 2;

        let mut coeffs = vec![0i16; LUT_SIZE];
        for i in 0..LUT_SIZE as i64 {
            let symbol = (i as usize) / POINTS_PER_SYMBOL;
            let phase = (i as usize) % POINTS_PER_SYMBOL;
            let target = symbol * SYMBOL_FACTOR + phase * PHASE_FACTOR;

            let t = (i - mid_point) as f64 / POINTS_PER_SYMBOL as f64;
            let denom_scale = 4.0 * roll_off * t;

            let value = if i == mid_point {
                SAMPLE_MAX as f64
            } else if denom_scale.abs() == 1.0 {
                scale
                    * (roll_off / std::f64::consts::SQRT_2)
                    * ((1.0 + 2.0 / PI) * (PI / (4.0 * roll_off)).sin()
                        + (1.0 - 2.0 / PI) * (PI / (4.0 * roll_off)).cos())
            } else {
                ((PI * t * (1.0 - roll_off)).sin()
                    + 4.0 * roll_off * t * (PI * t * (1.0 + roll_off)).cos())
                    / (PI * t * (1.0 - denom_scale * denom_scale))
                    * scale
            };

            coeffs[target] = value.round() as Sample;
        }

        Self { coeffs }
    }

    #[inline]
    fn taps_for_phase(&self, phase_index: usize) -> &[Sample] {
        let start = phase_index * PHASE_FACTOR;
        &self.coeffs[start..start + NUM_SYMBOLS]
    }
}

#[derive(Debug, Clone)]
pub struct RrcFilterState {
    phase: Phase,
    phase_increment: Phase,
    /// Position 0 is the newest input symbol; older symbols at higher
    /// indices.
    past_symbols: [IqSample; NUM_SYMBOLS],
}

impl RrcFilterState {
    pub fn new(symbol_rate: u32, sample_rate: u32) -> Self {
        let mut s = Self {
            phase: 0,
            phase_increment: phase_increment(symbol_rate, sample_rate),
            past_symbols: [IqSample::ZERO; NUM_SYMBOLS],
        };
        s.reset();
        s
    }

    pub fn reset(&mut self) {
        self.phase = 0;
        self.past_symbols = [IqSample::ZERO; NUM_SYMBOLS];
    }

    /// Current newest-first symbol history, for tests verifying the
    /// "position 0 is newest" invariant.
    pub fn history(&self) -> &[IqSample; NUM_SYMBOLS] {
        &self.past_symbols
    }

    /// Produce `out.len()` interpolated samples, pulling a new input
    /// symbol from `input` on every phase wrap. Returns the number of
    /// input symbols actually consumed; the caller must ensure `input`
    /// has at least that many elements available.
    pub fn process(&mut self, lut: &RrcLut, input: &[IqSample], out: &mut [IqSample]) -> usize {
        let mut phase = self.phase;
        let mut past = self.past_symbols;
        let mut consumed = 0usize;

        for slot in out.iter_mut() {
            let phase_index = (phase >> 24) as usize;
            let taps = lut.taps_for_phase(phase_index);

            let mut acc_i: Accumulator = 0;
            let mut acc_q: Accumulator = 0;
            for k in 0..NUM_SYMBOLS {
                let coeff = taps[k] as Accumulator;
                acc_i += coeff * past[k].i as Accumulator;
                acc_q += coeff * past[k].q as Accumulator;
            }
            *slot = IqSample {
                i: (acc_i >> 15) as Sample,
                q: (acc_q >> 15) as Sample,
            };

            let previous_phase = phase;
            phase = phase.wrapping_add(self.phase_increment);

            if phase < previous_phase {
                for k in (1..NUM_SYMBOLS).rev() {
                    past[k] = past[k - 1];
                }
                past[0] = input[consumed];
                consumed += 1;
            }
        }

        self.phase = phase;
        self.past_symbols = past;
        consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_tap_is_sample_max() {
        let lut = RrcLut::build(0.3);
        // LUT_SIZE/2 = 1408 = symbol 5 * 256 + phase 128, and that single
        // coefficient (i == mid_point) is exactly SAMPLE_MAX.
        let taps = lut.taps_for_phase(128);
        assert_eq!(taps[5], SAMPLE_MAX);
    }

    #[test]
    fn test_consumed_count_matches_symbol_count() {
        let lut = RrcLut::build(0.3);
        let mut filter = RrcFilterState::new(1, 2);
        let mut symbols = vec![
            IqSample::new(0, 16384),
            IqSample::new(0, 0),
            IqSample::new(8192, 0),
            IqSample::new(0, 0),
            IqSample::new(-8192, 0),
            IqSample::new(0, 0),
        ];
        symbols.extend(std::iter::repeat(IqSample::ZERO).take(10));
        assert_eq!(symbols.len(), 16);

        let mut out = vec![IqSample::ZERO; 32];
        let consumed = filter.process(&lut, &symbols, &mut out);
        assert_eq!(consumed, 16);
    }

    #[test]
    fn test_history_keeps_newest_at_position_zero() {
        let lut = RrcLut::build(0.3);
        // symbol_rate must stay strictly below sample_rate: an exact 1:1
        // ratio makes the phase increment formula truncate to zero (the
        // increment would need to be 2^32, which does not fit in a u32)
        // and the filter would never wrap, so the ratio here is 2.
        let mut filter = RrcFilterState::new(1, 2);
        let symbols = vec![
            IqSample::new(100, -100),
            IqSample::new(200, -200),
            IqSample::new(300, -300),
        ];
        let mut out = vec![IqSample::ZERO; 6];
        let consumed = filter.process(&lut, &symbols, &mut out);
        assert_eq!(consumed, 3);
        assert_eq!(filter.history()[0], IqSample::new(300, -300));
        assert_eq!(filter.history()[1], IqSample::new(200, -200));
        assert_eq!(filter.history()[2], IqSample::new(100, -100));
    }

    #[test]
    fn test_silence_in_silence_out() {
        let lut = RrcLut::build(0.3);
        let mut filter = RrcFilterState::new(1, 4);
        let symbols = vec![IqSample::ZERO; 20];
        let mut out = vec![IqSample::ZERO; 64];
        filter.process(&lut, &symbols, &mut out);
        assert!(out.iter().all(|s| s.i == 0 && s.q == 0));
    }
}
