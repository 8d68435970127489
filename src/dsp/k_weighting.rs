//! K-weighting pre-filter (ITU-R BS.1770-4)
//!
//! Two cascaded biquads: a high shelf (~+4 dB above ~1.7 kHz, head
//! diffraction) followed by a high-pass (~38 Hz, RLB weighting). The
//! coefficients are the published 48 kHz values and are applied unchanged at
//! every sample rate.

use super::biquad::{BiquadCoeffs, BiquadFilter};

/// Stage 1: high-shelf coefficients
pub const HIGH_SHELF: BiquadCoeffs = BiquadCoeffs::new(
    1.53512485958697,
    -2.69169618940638,
    1.19839281085285,
    -1.69065929318241,
    0.73248077421585,
);

/// Stage 2: high-pass coefficients
pub const HIGH_PASS: BiquadCoeffs = BiquadCoeffs::new(
    1.0,
    -2.0,
    1.0,
    -1.99004745483398,
    0.99007225036621,
);

/// K-weighting filter: shelf first, then high-pass
pub struct KWeightingFilter;

impl KWeightingFilter {
    /// K-weight a single channel, returning a buffer of the same length
    ///
    /// Both stages run in f64, so full-scale f32 input cannot overflow
    /// between them.
    pub fn apply(samples: &[f32]) -> Vec<f64> {
        let shelved = BiquadFilter::apply(samples, &HIGH_SHELF);
        BiquadFilter::apply(&shelved, &HIGH_PASS)
    }
}
