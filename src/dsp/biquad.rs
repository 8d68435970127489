//! Second-order IIR (biquad) filter
//!
//! Transfer function: H(z) = (b0 + b1*z^-1 + b2*z^-2) / (1 + a1*z^-1 + a2*z^-2),
//! i.e. coefficients already normalized by a0.

use serde::{Deserialize, Serialize};

/// Biquad filter coefficients (normalized, a0 = 1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Create a coefficient set
    pub const fn new(b0: f64, b1: f64, b2: f64, a1: f64, a2: f64) -> Self {
        Self { b0, b1, b2, a1, a2 }
    }

    /// Gain at DC (z = 1), or `None` when the denominator vanishes there
    pub fn dc_gain(&self) -> Option<f64> {
        let den = 1.0 + self.a1 + self.a2;
        if den.abs() < f64::EPSILON {
            None
        } else {
            Some((self.b0 + self.b1 + self.b2) / den)
        }
    }
}

/// Biquad filter state for one pass
#[derive(Debug, Clone, Copy, Default)]
struct BiquadState {
    x1: f64, // x[n-1]
    x2: f64, // x[n-2]
    y1: f64, // y[n-1]
    y2: f64, // y[n-2]
}

impl BiquadState {
    /// Process a single sample through the biquad filter
    #[inline]
    fn process(&mut self, input: f64, coeffs: &BiquadCoeffs) -> f64 {
        let output = coeffs.b0 * input + coeffs.b1 * self.x1 + coeffs.b2 * self.x2
            - coeffs.a1 * self.y1
            - coeffs.a2 * self.y2;

        // Shift delay line
        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }
}

/// Stateless biquad application
///
/// Filter memory starts at zero on every call and is dropped on return, so
/// each call is a pure function of its input. Output stays in f64 so that
/// cascaded stages never round or overflow between them.
pub struct BiquadFilter;

impl BiquadFilter {
    /// Filter `samples` with `coeffs`, returning a buffer of the same length
    pub fn apply<T: Copy + Into<f64>>(samples: &[T], coeffs: &BiquadCoeffs) -> Vec<f64> {
        let mut state = BiquadState::default();
        samples
            .iter()
            .map(|&x| state.process(x.into(), coeffs))
            .collect()
    }
}
