//! DSP building blocks
//!
//! Filters and level helpers shared by the analysis modules. Everything here
//! is a pure function over its input; no filter memory outlives a call.

mod biquad;
mod k_weighting;
pub mod level;

pub use biquad::{BiquadCoeffs, BiquadFilter};
pub use k_weighting::{KWeightingFilter, HIGH_PASS, HIGH_SHELF};
