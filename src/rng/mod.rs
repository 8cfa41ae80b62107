//! Uniform RNG and Gaussian shaper.

pub mod gaussian;
pub mod icdf_lut;
pub mod lcg;

pub use gaussian::RngState;
pub use icdf_lut::IcdfLut;
pub use lcg::{Lcg31Rng, UniformRng};

#[cfg(feature = "legacy-rng")]
pub use lcg::LegacyRng;

/// The default RNG configuration used throughout this crate.
pub type Rng = RngState<Lcg31Rng>;
