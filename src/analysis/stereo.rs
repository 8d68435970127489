//! Stereo field analysis
//!
//! Phase correlation, mid/side decomposition, width and balance of a stereo
//! pair. All measurements run over the shorter of the two channels.

use serde::{Deserialize, Serialize};

use crate::analysis::db_serde;
use crate::dsp::level::linear_to_db;

/// Stereo field measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StereoMetrics {
    /// Phase correlation (-1.0 = opposite phase, 0.0 = uncorrelated, 1.0 = identical)
    pub correlation: f64,
    /// Side share of mid + side RMS (0.0 = mono, 1.0 = pure side)
    pub width: f64,
    /// Level balance (-1.0 = hard left, 1.0 = hard right)
    pub balance: f64,
    /// Mid (L+R)/2 RMS in dBFS
    #[serde(with = "db_serde")]
    pub mid_level: f64,
    /// Side (L-R)/2 RMS in dBFS
    #[serde(with = "db_serde")]
    pub side_level: f64,
    /// Left RMS over the shared length (linear)
    pub left_rms: f64,
    /// Right RMS over the shared length (linear)
    pub right_rms: f64,
}

impl StereoMetrics {
    /// Metrics for silence or an empty pair
    pub fn silent() -> Self {
        Self {
            correlation: 0.0,
            width: 0.0,
            balance: 0.0,
            mid_level: f64::NEG_INFINITY,
            side_level: f64::NEG_INFINITY,
            left_rms: 0.0,
            right_rms: 0.0,
        }
    }
}

/// Running sums over a stereo pair
#[derive(Debug, Default)]
struct StereoSums {
    lr: f64,
    ll: f64,
    rr: f64,
    mid: f64,
    side: f64,
}

/// Stereo field analyzer
pub struct StereoFieldAnalyzer;

impl StereoFieldAnalyzer {
    /// Analyze a stereo pair over their shared length
    pub fn analyze(left: &[f32], right: &[f32]) -> StereoMetrics {
        let len = left.len().min(right.len());
        if len == 0 {
            return StereoMetrics::silent();
        }

        let mut sums = StereoSums::default();
        for (&l, &r) in left.iter().zip(right.iter()) {
            let (l, r) = (l as f64, r as f64);
            let mid = (l + r) * 0.5;
            let side = (l - r) * 0.5;

            sums.lr += l * r;
            sums.ll += l * l;
            sums.rr += r * r;
            sums.mid += mid * mid;
            sums.side += side * side;
        }

        let n = len as f64;
        let left_rms = (sums.ll / n).sqrt();
        let right_rms = (sums.rr / n).sqrt();
        let mid_rms = (sums.mid / n).sqrt();
        let side_rms = (sums.side / n).sqrt();

        StereoMetrics {
            correlation: correlation(&sums),
            width: width(mid_rms, side_rms),
            balance: balance(left_rms, right_rms),
            mid_level: linear_to_db(mid_rms),
            side_level: linear_to_db(side_rms),
            left_rms,
            right_rms,
        }
    }
}

fn correlation(sums: &StereoSums) -> f64 {
    let denominator = (sums.ll * sums.rr).sqrt();
    if sums.ll <= 0.0 || sums.rr <= 0.0 || denominator <= 0.0 {
        return 0.0;
    }
    (sums.lr / denominator).clamp(-1.0, 1.0)
}

fn width(mid_rms: f64, side_rms: f64) -> f64 {
    let total = mid_rms + side_rms;
    if total <= 0.0 {
        return 0.0;
    }
    (side_rms / total).clamp(0.0, 1.0)
}

fn balance(left_rms: f64, right_rms: f64) -> f64 {
    let louder = left_rms.max(right_rms);
    if louder <= 0.0 {
        return 0.0;
    }
    ((right_rms - left_rms) / louder).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn sine(frequency: f64, phase: f64, num_samples: usize) -> Vec<f32> {
        (0..num_samples)
            .map(|i| (2.0 * PI * frequency * i as f64 / 44100.0 + phase).sin() as f32)
            .collect()
    }

    #[test]
    fn test_identical_channels() {
        let signal = sine(440.0, 0.0, 4410);
        let metrics = StereoFieldAnalyzer::analyze(&signal, &signal);

        assert_abs_diff_eq!(metrics.correlation, 1.0, epsilon = 1e-9);
        assert_eq!(metrics.width, 0.0);
        assert_eq!(metrics.balance, 0.0);
        assert_eq!(metrics.side_level, f64::NEG_INFINITY);
    }

    #[test]
    fn test_inverted_channels() {
        let left = sine(440.0, 0.0, 4410);
        let right: Vec<f32> = left.iter().map(|s| -s).collect();
        let metrics = StereoFieldAnalyzer::analyze(&left, &right);

        assert_abs_diff_eq!(metrics.correlation, -1.0, epsilon = 1e-9);
        assert_eq!(metrics.width, 1.0);
        assert_eq!(metrics.mid_level, f64::NEG_INFINITY);
    }

    #[test]
    fn test_quadrature_is_uncorrelated() {
        // 100 full cycles so the cross term cancels
        let left = sine(1000.0, 0.0, 4410);
        let right = sine(1000.0, PI / 2.0, 4410);
        let metrics = StereoFieldAnalyzer::analyze(&left, &right);

        assert_abs_diff_eq!(metrics.correlation, 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(metrics.width, 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_silence() {
        let silence = vec![0.0f32; 100];
        assert_eq!(StereoFieldAnalyzer::analyze(&silence, &silence), StereoMetrics::silent());
        assert_eq!(StereoFieldAnalyzer::analyze(&[], &[]), StereoMetrics::silent());
    }

    #[test]
    fn test_one_silent_channel() {
        let left = sine(440.0, 0.0, 4410);
        let right = vec![0.0f32; 4410];
        let metrics = StereoFieldAnalyzer::analyze(&left, &right);

        assert_eq!(metrics.correlation, 0.0);
        assert_abs_diff_eq!(metrics.balance, -1.0, epsilon = 1e-12);
        // Hard-panned: mid and side carry equal energy
        assert_abs_diff_eq!(metrics.width, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_balance_towards_louder_side() {
        let left: Vec<f32> = sine(440.0, 0.0, 4410).iter().map(|s| s * 0.5).collect();
        let right = sine(440.0, 0.0, 4410);
        let metrics = StereoFieldAnalyzer::analyze(&left, &right);

        assert_abs_diff_eq!(metrics.balance, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(metrics.correlation, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_shorter_channel_bounds_analysis() {
        let left = sine(440.0, 0.0, 4410);
        let right = left[..2000].to_vec();
        let metrics = StereoFieldAnalyzer::analyze(&left, &right);

        assert_abs_diff_eq!(metrics.correlation, 1.0, epsilon = 1e-9);
        assert_eq!(metrics.width, 0.0);
    }
}
