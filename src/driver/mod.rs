//! The batch driver: orders the four DSP blocks, stitches the ZC preamble
//! ahead of the shaped payload, and appends the silent tail.

use crate::error::DspError;
use crate::filters::{RrcFilterState, RrcLut};
use crate::parameters::DspParameters;
use crate::phasor::{Algorithm, PhasorBankState, PhasorLut};
use crate::rng::{IcdfLut, Lcg31Rng, Rng};
use crate::types::IqSample;
use crate::zc::ZcGeneratorState;
use log::info;

/// Amplitude of the shift phasor P0: `1/sqrt(2)`, matching the original
/// driver's constant so the payload and the pilots share a comparable
/// dynamic range.
const SHIFT_AMPLITUDE: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// One synthesized frame: the interleaved I/Q samples ready for the DAC,
/// and the pre-filter symbol trace for the TSV sidecar.
pub struct Frame {
    pub samples: Vec<IqSample>,
    pub symbols: Vec<IqSample>,
}

/// Run the full pipeline once. `params` must already have passed
/// [`DspParameters::validate`]; this function re-validates defensively so
/// no block is constructed on bad parameters.
pub fn synthesize(params: &DspParameters) -> Result<Frame, DspError> {
    params.validate()?;

    info!("generating random symbols...");
    let symbols = generate_symbols(params);

    let sr = params.sample_rate;
    let num_samples_zc = params.zc_length as usize * (sr / params.zc_rate) as usize;
    let num_samples_payload = params.num_symbols as usize * (sr / params.symbol_rate) as usize;
    let num_samples_tail =
        params.num_null_symbols as usize * (sr / params.symbol_rate) as usize;
    let num_samples = num_samples_zc + num_samples_payload + num_samples_tail;

    info!("generating IQ samples...");
    let mut samples = vec![IqSample::ZERO; num_samples];

    let rrc_lut = RrcLut::build(params.rrc_roll_off);
    let mut rrc = RrcFilterState::new(params.symbol_rate, sr);

    // The first ~6.25 symbol periods are filter transients. They are
    // produced into a scratch buffer at the payload's start offset, then
    // overwritten by the kept payload in the very next call, reusing that
    // address the same way the original driver does.
    let num_first_samples_truncated = (sr / params.symbol_rate) as usize * 25 / 4;
    debug_assert!(
        num_samples_zc + num_first_samples_truncated <= samples.len(),
        "payload+tail too short to hold the transient scratch run"
    );
    let consumed_transient = rrc.process(
        &rrc_lut,
        &symbols,
        &mut samples[num_samples_zc..num_samples_zc + num_first_samples_truncated],
    );
    let _consumed_payload = rrc.process(
        &rrc_lut,
        &symbols[consumed_transient..],
        &mut samples[num_samples_zc..num_samples_zc + num_samples_payload],
    );

    let phasor_lut = PhasorLut::build();
    let frequencies = [
        params.shift_frequency,
        params.pilot_frequency[0],
        params.pilot_frequency[1],
    ];
    let amplitudes = [
        SHIFT_AMPLITUDE,
        params.pilot_amplitude[0],
        params.pilot_amplitude[1],
    ];
    let mut phasor_bank = PhasorBankState::new(Algorithm::ShiftTwoPilots, frequencies, amplitudes, sr);
    phasor_bank.process(
        &phasor_lut,
        &mut samples[num_samples_zc..num_samples_zc + num_samples_payload + num_samples_tail],
    );

    info!("generating sync sequence...");
    let mut zc = ZcGeneratorState::new(
        params.zc_length,
        params.zc_root,
        params.zc_shift,
        params.zc_rate,
        sr,
    );
    zc.process(&phasor_lut, &mut samples[0..num_samples_zc]);

    info!("done.");

    Ok(Frame { samples, symbols })
}

/// Draw `params.num_symbols` Gaussian symbols, then pad by
/// `NUM_SYMBOLS` (the RRC filter's tap count) zero symbols so the
/// filter's final outputs are drained with silence rather than garbage.
fn generate_symbols(params: &DspParameters) -> Vec<IqSample> {
    let icdf_lut = IcdfLut::build();
    let mut rng: Rng = Rng::new(
        Lcg31Rng::new(params.seed, 0),
        params.symbol_scale,
        params.symbol_max_value,
        params.symbol_clamp,
    );

    let mut symbols = vec![IqSample::ZERO; params.num_symbols as usize + crate::filters::rrc::NUM_SYMBOLS];
    rng.generate_icdf(&icdf_lut, &mut symbols[..params.num_symbols as usize]);
    symbols
}
