//! Zadoff-Chu sync preamble generator.
//!
//! Reuses the phasor LUT built by the phasor bank; never mutates it.

use crate::phasor::PhasorLut;
use crate::types::{phase_increment, IqSample, Phase, DAC_OUTPUT_SCALE};
use std::num::Wrapping;

#[derive(Debug, Clone)]
pub struct ZcGeneratorState {
    length: u32,
    root: u32,
    shift: u32,
    phase: Phase,
    phase_increment: Phase,
    /// Chip counter. `Wrapping<u32>` because the initial state is
    /// `u32::MAX` and the first wrap must carry it to 0.
    n: Wrapping<u32>,
    value: IqSample,
}

impl ZcGeneratorState {
    pub fn new(length: u32, root: u32, shift: u32, zc_rate: u32, sample_rate: u32) -> Self {
        let mut s = Self {
            length,
            root,
            shift,
            phase: 0,
            phase_increment: phase_increment(zc_rate, sample_rate),
            n: Wrapping(0),
            value: IqSample::ZERO,
        };
        s.reset();
        s
    }

    /// `phase = 2^32 - 1`, `n = 2^32 - 1`: the first phase increment wraps
    /// immediately and advances `n` to 0, so the first emitted chip is
    /// `z[0]`.
    pub fn reset(&mut self) {
        self.phase = u32::MAX;
        self.n = Wrapping(u32::MAX);
        self.value = IqSample::ZERO;
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    /// Fill `out` with `out.len()` samples at the final sample rate,
    /// holding the current chip between phase wraps (zero-order hold).
    pub fn process(&mut self, lut: &PhasorLut, out: &mut [IqSample]) {
        let mut phase = self.phase;
        let mut n = self.n;

        for slot in out.iter_mut() {
            let previous_phase = phase;
            phase = phase.wrapping_add(self.phase_increment);

            if phase < previous_phase {
                let l = Wrapping(self.length);
                n = (n + Wrapping(1)) % l;
                let u = Wrapping(self.root);
                let parity = Wrapping(self.length % 2);
                let two_shift = Wrapping(2 * self.shift);
                let i = u * n * (n + parity + two_shift);
                let i = i * Wrapping((1u32 << 31) / self.length);
                let v = lut.lookup((Wrapping(0u32) - i).0);
                self.value = IqSample {
                    i: (v.i as i32 * DAC_OUTPUT_SCALE) as i16,
                    q: (v.q as i32 * DAC_OUTPUT_SCALE) as i16,
                };
            }

            *slot = self.value;
        }

        self.phase = phase;
        self.n = n;
    }
}
