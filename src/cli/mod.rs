//! Command-line surface: flag parsing and translation into [`DspParameters`].

use crate::parameters::DspParameters;
use clap::Parser;
use std::path::PathBuf;

/// Synthesize a CV-QKD I/Q test frame: a Zadoff-Chu sync preamble
/// followed by an RRC-shaped Gaussian payload with two pilot tones.
#[derive(Debug, Parser)]
#[command(name = "cvqkd-iq-synth", version, about)]
pub struct Args {
    /// DAC sample clock, Hz.
    #[arg(long, default_value_t = 2_000_000_000)]
    pub sample_rate: u32,

    /// Payload symbol rate, Hz.
    #[arg(long, default_value_t = 100_000_000)]
    pub symbol_rate: u32,

    /// Zadoff-Chu chip rate, Hz.
    #[arg(long, default_value_t = 50_000_000)]
    pub zc_rate: u32,

    /// Payload length, in symbols.
    #[arg(long, default_value_t = 1_000_000)]
    pub num_symbols: u32,

    /// Silent tail length, in symbols.
    #[arg(long, default_value_t = 10)]
    pub num_null_symbols: u32,

    /// Zadoff-Chu sequence length.
    #[arg(long, default_value_t = 3989)]
    pub zc_length: u32,

    /// Zadoff-Chu root index.
    #[arg(long, default_value_t = 5)]
    pub zc_root: u32,

    /// Zadoff-Chu cyclic shift.
    #[arg(long, default_value_t = 0)]
    pub zc_shift: u32,

    /// Gaussian payload standard deviation, in Q15 units.
    #[arg(long, default_value_t = 7500)]
    pub symbol_scale: u32,

    /// Clip bound applied when `--symbol-clamp` is set.
    #[arg(long, default_value_t = 0x5fff)]
    pub symbol_max_value: u32,

    /// Clip payload symbols to `--symbol-max-value` instead of letting
    /// them wrap.
    #[arg(long, default_value_t = false)]
    pub symbol_clamp: bool,

    /// RRC roll-off factor, in (0, 1).
    #[arg(long, default_value_t = 0.3)]
    pub rrc_roll_off: f32,

    /// Frequency shift phasor P0, Hz.
    #[arg(long, default_value_t = 0)]
    pub shift_frequency: u32,

    /// Pilot tone P1 frequency, Hz.
    #[arg(long, default_value_t = 200_000_000)]
    pub pilot_1_freq: u32,

    /// Pilot tone P2 frequency, Hz.
    #[arg(long, default_value_t = 220_000_000)]
    pub pilot_2_freq: u32,

    /// Pilot tone P1 amplitude, in [0, 1].
    #[arg(long, default_value_t = 0.16)]
    pub pilot_1_amplitude: f32,

    /// Pilot tone P2 amplitude, in [0, 1].
    #[arg(long, default_value_t = 0.16)]
    pub pilot_2_amplitude: f32,

    /// RNG seed.
    #[arg(long, default_value_t = 1)]
    pub seed: u32,

    /// Binary I/Q sink.
    #[arg(long, default_value = "out_iq.bin")]
    pub output: PathBuf,

    /// TSV symbol trace sink.
    #[arg(long, default_value = "out_symbols.tsv")]
    pub output_symbols: PathBuf,

    /// Log filter, e.g. `info`, `debug`. Overridden by `RUST_LOG` if set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl From<&Args> for DspParameters {
    fn from(args: &Args) -> Self {
        Self {
            sample_rate: args.sample_rate,
            symbol_rate: args.symbol_rate,
            zc_rate: args.zc_rate,
            num_symbols: args.num_symbols,
            num_null_symbols: args.num_null_symbols,
            zc_length: args.zc_length,
            zc_root: args.zc_root,
            zc_shift: args.zc_shift,
            shift_frequency: args.shift_frequency,
            symbol_scale: args.symbol_scale,
            symbol_max_value: args.symbol_max_value,
            symbol_clamp: args.symbol_clamp,
            pilot_frequency: [args.pilot_1_freq, args.pilot_2_freq],
            pilot_amplitude: [args.pilot_1_amplitude, args.pilot_2_amplitude],
            rrc_roll_off: args.rrc_roll_off,
            seed: args.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dsp_parameters_default() {
        let args = Args::parse_from(["cvqkd-iq-synth"]);
        let params: DspParameters = (&args).into();
        assert_eq!(params, DspParameters::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "cvqkd-iq-synth",
            "--seed",
            "42",
            "--num-symbols",
            "10",
            "--pilot-1-freq",
            "1000",
        ]);
        let params: DspParameters = (&args).into();
        assert_eq!(params.seed, 42);
        assert_eq!(params.num_symbols, 10);
        assert_eq!(params.pilot_frequency[0], 1000);
    }
}
