//! Phasor bank: three independent phase accumulators, one used as a
//! complex multiplier on the payload, two added as pilot tones.

use super::lut::PhasorLut;
use crate::types::{phase_increment, Accumulator, IqSample, Phase, Sample, DAC_OUTPUT_SCALE, SAMPLE_MAX};

pub const NUM_PHASORS: usize = 3;

/// The only mixing algorithm the block supports: `x' = x * P0 + P1 + P2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    ShiftTwoPilots,
}

#[derive(Debug, Clone, Copy)]
struct PhasorLocal {
    phase: Phase,
    phase_increment: Phase,
    amplitude: Accumulator,
}

#[derive(Debug, Clone)]
pub struct PhasorBankState {
    phasors: [PhasorLocal; NUM_PHASORS],
    algorithm: Algorithm,
}

impl PhasorBankState {
    /// `frequency`/`amplitude` are P0 (shift), P1, P2 (pilots) in order.
    /// `amplitude` is in `[0, 1]`; for the pilots it is additionally
    /// scaled by `DAC_OUTPUT_SCALE` (a no-op in fixed-point mode, present
    /// for parity with the float-mode formula).
    pub fn new(
        algorithm: Algorithm,
        frequency: [u32; NUM_PHASORS],
        amplitude: [f32; NUM_PHASORS],
        sample_rate: u32,
    ) -> Self {
        let mut phasors = [PhasorLocal {
            phase: 0,
            phase_increment: 0,
            amplitude: 0,
        }; NUM_PHASORS];

        for i in 0..NUM_PHASORS {
            phasors[i].phase_increment = phase_increment(frequency[i], sample_rate);
            phasors[i].amplitude = (amplitude[i] * SAMPLE_MAX as f32) as Accumulator;
        }

        if algorithm == Algorithm::ShiftTwoPilots {
            phasors[1].amplitude *= DAC_OUTPUT_SCALE;
            phasors[2].amplitude *= DAC_OUTPUT_SCALE;
        }

        Self { phasors, algorithm }
    }

    pub fn reset(&mut self) {
        for p in &mut self.phasors {
            p.phase = 0;
        }
    }

    /// Mix `in_out` in place, reading the shared `lut` for each phasor's
    /// instantaneous value. State is copied into a local at entry and
    /// written back at exit, matching the original's load-local,
    /// write-back idiom.
    pub fn process(&mut self, lut: &PhasorLut, in_out: &mut [IqSample]) {
        let mut s = self.phasors;

        for sample in in_out.iter_mut() {
            let mut phasors = [IqSample::ZERO; NUM_PHASORS];
            for (i, local) in s.iter_mut().enumerate() {
                let p = lut.lookup(local.phase);
                phasors[i] = scale_phasor(p, local.amplitude);
                local.phase = local.phase.wrapping_add(local.phase_increment);
            }

            let mut x = *sample;
            if self.algorithm == Algorithm::ShiftTwoPilots {
                let y = phasors[0];
                x = complex_mul_q15(x, y);
                x.i = x.i.wrapping_add(phasors[1].i).wrapping_add(phasors[2].i);
                x.q = x.q.wrapping_add(phasors[1].q).wrapping_add(phasors[2].q);
            }
            *sample = x;
        }

        self.phasors = s;
    }
}

#[inline]
fn scale_phasor(p: IqSample, amplitude: Accumulator) -> IqSample {
    IqSample {
        i: ((p.i as Accumulator * amplitude) >> 15) as Sample,
        q: ((p.q as Accumulator * amplitude) >> 15) as Sample,
    }
}

/// Complex multiply in Q15: `i = (x.i*y.i - x.q*y.q) >> 15`,
/// `q = (x.q*y.i + x.i*y.q) >> 15`.
#[inline]
pub fn complex_mul_q15(x: IqSample, y: IqSample) -> IqSample {
    let xi = x.i as Accumulator;
    let xq = x.q as Accumulator;
    let yi = y.i as Accumulator;
    let yq = y.q as Accumulator;
    IqSample {
        i: ((xi * yi - xq * yq) >> 15) as Sample,
        q: ((xq * yi + xi * yq) >> 15) as Sample,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(
        freq: [u32; 3],
        amp: [f32; 3],
        rate: u32,
        input: &[IqSample],
    ) -> Vec<IqSample> {
        let lut = PhasorLut::build();
        let mut bank = PhasorBankState::new(Algorithm::ShiftTwoPilots, freq, amp, rate);
        let mut buf = input.to_vec();
        bank.process(&lut, &mut buf);
        buf
    }

    fn geometry_input() -> Vec<IqSample> {
        let mut v = vec![IqSample::new(16384, 0); 8];
        v.extend(vec![IqSample::new(0, -8192); 8]);
        v
    }

    #[test]
    fn test_shift_only_and_pilots_only_sum_to_combined() {
        use approx::assert_abs_diff_eq;

        let freq = [1, 2, 4];
        let input = geometry_input();

        let shift_only = run(freq, [0.25, 0.0, 0.0], 8, &input);
        let pilots_only = run(freq, [0.0, 0.25, 0.25], 8, &input);
        let combined = run(freq, [0.25, 0.25, 0.25], 8, &input);

        assert_eq!(shift_only.len(), combined.len());
        for ((a, b), c) in shift_only.iter().zip(pilots_only.iter()).zip(combined.iter()) {
            assert_abs_diff_eq!((a.i as i32 + b.i as i32) as f64, c.i as f64, epsilon = 1.0);
            assert_abs_diff_eq!((a.q as i32 + b.q as i32) as f64, c.q as f64, epsilon = 1.0);
        }
    }

    #[test]
    fn test_zero_amplitude_shift_is_identity_on_input() {
        let input = geometry_input();
        let out = run([1, 2, 4], [0.0, 0.0, 0.0], 8, &input);
        // P0 has zero amplitude, so the complex multiplier collapses x to
        // (0,0); only the (also zero-amplitude) pilots are added.
        for s in out {
            assert_eq!(s, IqSample::ZERO);
        }
    }

    #[test]
    fn test_reset_zeroes_all_phases() {
        let mut bank = PhasorBankState::new(
            Algorithm::ShiftTwoPilots,
            [1, 2, 4],
            [0.25, 0.1, 0.1],
            8,
        );
        let lut = PhasorLut::build();
        let mut buf = geometry_input();
        bank.process(&lut, &mut buf);
        bank.reset();
        assert!(bank.phasors.iter().all(|p| p.phase == 0));
    }
}
