//! Level conversions and basic signal measurements
//!
//! Every dB-valued helper returns either a finite value or exactly
//! `f64::NEG_INFINITY`; none of them can produce NaN for finite input.

/// BS.1770 offset applied when converting mean square to LUFS
pub const LUFS_OFFSET: f64 = -0.691;

/// Convert linear amplitude to decibels (-inf at or below zero)
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    if linear <= 0.0 {
        f64::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

/// Convert a mean-square power to LUFS (-inf at or below zero)
#[inline]
pub fn power_to_lufs(mean_square: f64) -> f64 {
    if mean_square <= 0.0 {
        f64::NEG_INFINITY
    } else {
        LUFS_OFFSET + 10.0 * mean_square.log10()
    }
}

/// Convert a LUFS value back to the linear power domain used for averaging
///
/// This is `10^(L/10)`; the -0.691 offset cancels out when the mean is
/// converted back with [`energy_mean_lufs`].
#[inline]
pub fn lufs_to_power(lufs: f64) -> f64 {
    10.0_f64.powf(lufs / 10.0)
}

/// Energy-domain mean of LUFS values (-inf for an empty set)
pub fn energy_mean_lufs(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NEG_INFINITY;
    }
    let mean = values.iter().map(|&l| lufs_to_power(l)).sum::<f64>() / values.len() as f64;
    if mean <= 0.0 {
        f64::NEG_INFINITY
    } else {
        10.0 * mean.log10()
    }
}

/// Mean of squared samples (0 for an empty slice)
pub fn mean_square(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    sum_of_squares(samples) / samples.len() as f64
}

/// Sum of squared samples, accumulated in f64
#[inline]
pub fn sum_of_squares(samples: &[f32]) -> f64 {
    samples.iter().map(|&s| (s as f64) * (s as f64)).sum()
}

/// Calculate RMS (Root Mean Square) of samples
pub fn calculate_rms(samples: &[f32]) -> f64 {
    mean_square(samples).sqrt()
}

/// Calculate peak (maximum absolute value) of samples
pub fn calculate_peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0_f32, f32::max)
}
