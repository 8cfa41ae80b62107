//! Phasor bank and its shared look-up table.

pub mod bank;
pub mod lut;

pub use bank::{Algorithm, PhasorBankState};
pub use lut::PhasorLut;
