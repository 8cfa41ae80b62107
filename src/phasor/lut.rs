//! Shared cosine/sine phasor look-up table.
//!
//! Read by both the phasor bank and the Zadoff-Chu generator. Ownership
//! is resolved by an explicit, driver-owned build step rather than by
//! lazy-by-first-touch initialization: [`PhasorLut::build`] always
//! produces a fully-populated table before either reader sees it.
//!
//! The idempotence check (`fill` is a no-op on an already-populated
//! table, detected by inspecting entry 0) is kept and tested anyway,
//! since the data model's own invariant names it directly.

use crate::types::{IqSample, Sample, SAMPLE_MAX};
use std::f64::consts::PI;

/// log2 of the table size: the top 15 bits of a 32-bit phase select an
/// entry.
pub const LOG2_SIZE: u32 = 15;
pub const SIZE: usize = 1 << LOG2_SIZE;

/// Shift to turn a 32-bit phase into a table index (discards the low
/// fractional bits, so there is no interpolation between entries).
pub const INTEGRAL_PART_SHIFT: u32 = 32 - LOG2_SIZE;

#[derive(Debug, Clone)]
pub struct PhasorLut {
    table: Vec<IqSample>,
}

impl PhasorLut {
    /// Build a fully-populated table. Call once per run; the result is
    /// handed by reference to every block that needs it.
    pub fn build() -> Self {
        let mut table = vec![IqSample::ZERO; SIZE];
        fill(&mut table);
        Self { table }
    }

    /// Look up the phasor at `phase`, discarding the low
    /// `INTEGRAL_PART_SHIFT` fractional bits.
    #[inline(always)]
    pub fn lookup(&self, phase: u32) -> IqSample {
        self.table[(phase >> INTEGRAL_PART_SHIFT) as usize]
    }

    pub fn as_slice(&self) -> &[IqSample] {
        &self.table
    }
}

/// Populate `table` with `cos`/`sin` sampled over `[0, 2*pi)`, unless it
/// already looks populated (entry 0 is `(SAMPLE_MAX, 0)`), matching
/// `dsp_phasor_bank_fill_lut`'s idempotence check.
fn fill(table: &mut [IqSample]) {
    if table[0].i == SAMPLE_MAX && table[0].q == 0 {
        return;
    }
    for (idx, entry) in table.iter_mut().enumerate() {
        let angle = 2.0 * PI * idx as f64 / SIZE as f64;
        *entry = IqSample {
            i: (angle.cos() * SAMPLE_MAX as f64).round() as Sample,
            q: (angle.sin() * SAMPLE_MAX as f64).round() as Sample,
        };
    }
}
