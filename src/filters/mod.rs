//! Interpolating pulse-shaping filter.

pub mod rrc;

pub use rrc::{RrcFilterState, RrcLut};
