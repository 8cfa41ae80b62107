//! Typed error surface for the DSP core.
//!
//! Narrow on purpose: parameter validation is the only way the core
//! fails. Runtime block processing never returns an error.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum DspError {
    #[error("sample_rate must be nonzero")]
    ZeroSampleRate,

    #[error("symbol_rate must be nonzero")]
    ZeroSymbolRate,

    #[error("zc_rate must be nonzero")]
    ZeroZcRate,

    #[error("rrc_roll_off must be in (0, 1), got {roll_off}")]
    RollOffOutOfRange { roll_off: f32 },

    #[error("zc_length must be nonzero")]
    ZcLengthZero,

    #[error("zc_root ({root}) must be coprime with zc_length ({length})")]
    ZcRootNotCoprime { root: u32, length: u32 },
}
