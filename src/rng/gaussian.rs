//! Gaussian shaper: maps uniform ints to I/Q samples whose
//! marginals approximate `N(0, scale^2)`.

use super::icdf_lut::IcdfLut;
use super::lcg::UniformRng;
use crate::types::{IqSample, Sample};
use std::f64::consts::PI;

/// RNG + shaping parameters: a uniform source plus the output scale (σ),
/// an optional saturation bound, and whether to clamp.
pub struct RngState<R: UniformRng> {
    rng: R,
    scale: u32,
    max_magnitude: u32,
    clamp: bool,
}

impl<R: UniformRng> RngState<R> {
    pub fn new(rng: R, scale: u32, max_magnitude: u32, clamp: bool) -> Self {
        Self {
            rng,
            scale,
            max_magnitude,
            clamp,
        }
    }

    fn shape(&self, value: f64) -> Sample {
        let scaled = value * self.scale as f64;
        let clamped = if self.clamp {
            scaled.clamp(-(self.max_magnitude as f64), self.max_magnitude as f64)
        } else {
            scaled.clamp(i16::MIN as f64, i16::MAX as f64)
        };
        clamped.round() as Sample
    }

    /// Fill `out` with I/Q samples via inverse-CDF lookup. I and Q are
    /// drawn from independent calls into the uniform source.
    pub fn generate_icdf(&mut self, lut: &IcdfLut, out: &mut [IqSample]) {
        for slot in out.iter_mut() {
            let i = lut.sample(self.rng.uniform_u32());
            let q = lut.sample(self.rng.uniform_u32());
            *slot = IqSample {
                i: self.shape(i),
                q: self.shape(q),
            };
        }
    }

    /// Reference Box-Muller alternate, not on the critical path, kept
    /// for parity checking against the ICDF path's statistics.
    pub fn generate_box_muller(&mut self, out: &mut [IqSample]) {
        for slot in out.iter_mut() {
            let u1 = (self.rng.uniform_float() as f64).max(f64::EPSILON);
            let u2 = self.rng.uniform_float() as f64;
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * PI * u2;
            *slot = IqSample {
                i: self.shape(r * theta.cos()),
                q: self.shape(r * theta.sin()),
            };
        }
    }
}
