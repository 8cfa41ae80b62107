//! Four-resolution inverse-CDF look-up table for the Gaussian shaper.
//!
//! The original ships a precomputed deployment-time table built offline.
//! This implementation regenerates a table with the same four-tile scheme
//! from a closed-form rational approximation of the standard normal
//! inverse CDF (Peter Acklam's algorithm), so the shaper's tests check
//! statistical properties of the distribution rather than an exact match
//! against the original's table contents.

/// Standard normal inverse CDF via Acklam's rational approximation.
/// Accurate to within about 1.15e-9 absolute error for `p` in `(0, 1)`.
fn normal_icdf(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e+01,
        2.209_460_984_245_205e+02,
        -2.759_285_104_469_687e+02,
        1.383_577_518_672_690e+02,
        -3.066_479_806_614_716e+01,
        2.506_628_277_459_239e+00,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e+01,
        1.615_858_368_580_409e+02,
        -1.556_989_798_598_866e+02,
        6.680_131_188_771_972e+01,
        -1.328_068_155_288_572e+01,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-03,
        -3.223_964_580_411_365e-01,
        -2.400_758_277_161_838e+00,
        -2.549_732_539_343_734e+00,
        4.374_664_141_464_968e+00,
        2.938_163_982_698_783e+00,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-03,
        3.224_671_290_700_398e-01,
        2.445_134_137_142_996e+00,
        3.754_408_661_907_416e+00,
    ];

    const P_LOW: f64 = 0.024_25;
    const P_HIGH: f64 = 1.0 - P_LOW;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

/// Smallest probability fed to [`normal_icdf`], avoiding the `p -> 0`
/// singularity at the very edge of a tile.
const MIN_P: f64 = 1.0 / (1u64 << 40) as f64;

/// Points per tile (256 cells => 257 boundary samples for clean lerp).
const POINTS_PER_TILE: usize = 257;

struct Tile {
    lo: f64,
    hi: f64,
    samples: Vec<f32>,
}

impl Tile {
    fn build(lo: f64, hi: f64, points: usize) -> Self {
        let cells = points - 1;
        let samples = (0..points)
            .map(|k| {
                let p = lo + (hi - lo) * (k as f64 / cells as f64);
                normal_icdf(p.max(MIN_P)) as f32
            })
            .collect();
        Self { lo, hi, samples }
    }

    fn interpolate(&self, q: f64) -> f64 {
        let cells = (self.samples.len() - 1) as f64;
        let t = (q - self.lo) / (self.hi - self.lo) * cells;
        let idx = (t.floor() as usize).min(self.samples.len() - 2);
        let frac = t - idx as f64;
        let a = self.samples[idx] as f64;
        let b = self.samples[idx + 1] as f64;
        a + (b - a) * frac
    }
}

/// The four-resolution ICDF table over `(0, 0.5]`. Tiles get progressively
/// finer (more points per unit of probability) the closer they sit to the
/// tail, where the inverse CDF's curvature is highest:
/// `(0, 1/4096]`, `(1/4096, 1/256]`, `(1/256, 1/16]`, `(1/16, 1/2]` (the
/// last covering the original's 16ths numbered 2..8; a single
/// uniformly-subdivided array here is numerically identical to seven
/// 1/16-wide sub-tiles, since the division is uniform either way).
pub struct IcdfLut {
    tiles: [Tile; 4],
}

impl IcdfLut {
    pub fn build() -> Self {
        Self {
            tiles: [
                Tile::build(0.0, 1.0 / 4096.0, POINTS_PER_TILE),
                Tile::build(1.0 / 4096.0, 1.0 / 256.0, POINTS_PER_TILE),
                Tile::build(1.0 / 256.0, 1.0 / 16.0, POINTS_PER_TILE),
                Tile::build(1.0 / 16.0, 0.5, 7 * (POINTS_PER_TILE - 1) + 1),
            ],
        }
    }

    /// Map a raw uniform `u32` (interpreted as a fraction of `2^32`) to a
    /// standard-normal sample via inverse-CDF lookup and interpolation,
    /// recovering the `p > 0.5` half of the distribution by symmetry.
    pub fn sample(&self, raw: u32) -> f64 {
        let p = raw as f64 / ((1u64 << 32) as f64);
        let (q, negate) = if p <= 0.5 { (p, false) } else { (1.0 - p, true) };

        let value = if q <= 1.0 / 4096.0 {
            self.tiles[0].interpolate(q)
        } else if q <= 1.0 / 256.0 {
            self.tiles[1].interpolate(q)
        } else if q <= 1.0 / 16.0 {
            self.tiles[2].interpolate(q)
        } else {
            self.tiles[3].interpolate(q)
        };

        if negate {
            -value
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_maps_near_zero() {
        let lut = IcdfLut::build();
        let v = lut.sample(1u32 << 31);
        assert!(v.abs() < 0.01, "median sample should be ~0, got {}", v);
    }

    #[test]
    fn test_distribution_is_antisymmetric_about_median() {
        let lut = IcdfLut::build();
        for offset in [1u32, 1000, 1 << 20, 1 << 30] {
            let below = lut.sample((1u64 << 31).wrapping_sub(offset as u64) as u32);
            let above = lut.sample((1u64 << 31).wrapping_add(offset as u64) as u32);
            assert!(
                (below + above).abs() < 0.05,
                "expected antisymmetry, got {} and {}",
                below,
                above
            );
        }
    }

    #[test]
    fn test_tail_values_grow_monotonically_more_negative() {
        let lut = IcdfLut::build();
        let a = lut.sample(1 << 28);
        let b = lut.sample(1 << 20);
        let c = lut.sample(1 << 10);
        assert!(a < 0.0 && b < a && c < b, "expected {} < {} < {}", c, b, a);
    }

    #[test]
    fn test_known_quantile_matches_reference() {
        use approx::assert_abs_diff_eq;

        // Φ^-1(0.975) ≈ 1.95996
        let lut = IcdfLut::build();
        let raw = (0.975 * (1u64 << 32) as f64) as u32;
        let v = lut.sample(raw);
        assert_abs_diff_eq!(v, 1.95996, epsilon = 0.01);
    }
}
