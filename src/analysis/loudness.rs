//! Gated loudness measurement (ITU-R BS.1770-4 / EBU R128)
//!
//! The meter analyzes a complete, finite programme:
//!
//! 1. K-weight every channel and sum the squared outputs per sample (unity
//!    weight per channel, no surround weighting).
//! 2. Slice the summed signal into 400 ms blocks with a 100 ms hop (75%
//!    overlap) and convert each block's mean square to LUFS.
//! 3. Gate: drop blocks at or below -70 LUFS, then drop blocks more than
//!    10 LU below the energy mean of the survivors. Integrated loudness is
//!    the energy mean of what remains.
//! 4. Momentary and short-term loudness are the ungated mean square of the
//!    last 400 ms / 3 s, clamped to the programme length.
//! 5. Loudness range is the spread between the 10th and 95th percentile of
//!    the absolutely gated blocks, once more than ten of them exist.

use serde::{Deserialize, Serialize};

use crate::analysis::db_serde;
use crate::dsp::level::{energy_mean_lufs, power_to_lufs};
use crate::dsp::KWeightingFilter;

// ============================================================================
// Constants
// ============================================================================

/// Absolute gate threshold in LUFS
pub const ABSOLUTE_GATE_LUFS: f64 = -70.0;

/// Relative gate offset in LU below the ungated reference
pub const RELATIVE_GATE_LU: f64 = -10.0;

/// Gating block length (and momentary window) in seconds
pub const BLOCK_SECONDS: f64 = 0.4;

/// Short-term window in seconds
pub const SHORT_TERM_SECONDS: f64 = 3.0;

/// Block hop as a fraction of the block length (75% overlap)
pub const BLOCK_HOP_RATIO: f64 = 0.25;

/// Lower loudness-range percentile
pub const LRA_LOW_PERCENTILE: f64 = 0.10;

/// Upper loudness-range percentile
pub const LRA_HIGH_PERCENTILE: f64 = 0.95;

/// Loudness range needs strictly more than this many gated blocks
pub const LRA_MIN_BLOCKS: usize = 10;

// ============================================================================
// Loudness Reading
// ============================================================================

/// Result of a loudness measurement
///
/// LUFS fields are finite or exactly negative infinity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoudnessReading {
    /// Loudness of the final 400 ms, in LUFS
    #[serde(with = "db_serde")]
    pub momentary: f64,
    /// Loudness of the final 3 s, in LUFS
    #[serde(with = "db_serde")]
    pub short_term: f64,
    /// Gated programme loudness, in LUFS
    #[serde(with = "db_serde")]
    pub integrated: f64,
    /// Loudness range, in LU
    pub loudness_range: f64,
    /// Number of complete 400 ms blocks
    pub block_count: usize,
    /// Blocks surviving the absolute gate
    pub gated_block_count: usize,
    /// Relative gate threshold, in LUFS
    #[serde(with = "db_serde")]
    pub relative_threshold: f64,
}

impl LoudnessReading {
    /// Reading for a programme with no measurable signal
    pub fn silent() -> Self {
        Self {
            momentary: f64::NEG_INFINITY,
            short_term: f64::NEG_INFINITY,
            integrated: f64::NEG_INFINITY,
            loudness_range: 0.0,
            block_count: 0,
            gated_block_count: 0,
            relative_threshold: f64::NEG_INFINITY,
        }
    }
}

// ============================================================================
// Loudness Meter
// ============================================================================

/// Block-gated loudness meter over a complete programme
pub struct LoudnessMeter;

impl LoudnessMeter {
    /// Measure loudness of one or more channels sharing `sample_rate`
    ///
    /// Channels of unequal length are truncated to the shortest. A zero
    /// sample rate or empty input yields a silent reading.
    pub fn measure(channels: &[&[f32]], sample_rate: u32) -> LoudnessReading {
        let power = summed_k_weighted_power(channels);
        if power.is_empty() || sample_rate == 0 {
            return LoudnessReading::silent();
        }

        let block_len = (BLOCK_SECONDS * sample_rate as f64).floor() as usize;
        let hop = (block_len as f64 * BLOCK_HOP_RATIO).floor() as usize;
        let short_term_len = (SHORT_TERM_SECONDS * sample_rate as f64).floor() as usize;

        let blocks = block_loudness(&power, block_len, hop);
        let gated: Vec<f64> = blocks
            .iter()
            .copied()
            .filter(|&l| l > ABSOLUTE_GATE_LUFS)
            .collect();

        let (integrated, relative_threshold) = integrated_loudness(&gated);
        let loudness_range = loudness_range(&gated);

        tracing::trace!(
            blocks = blocks.len(),
            gated = gated.len(),
            relative_threshold,
            integrated,
            "loudness blocks gated"
        );

        // At very low sample rates the windows can floor to zero samples
        LoudnessReading {
            momentary: tail_loudness(&power, block_len.max(1)),
            short_term: tail_loudness(&power, short_term_len.max(1)),
            integrated,
            loudness_range,
            block_count: blocks.len(),
            gated_block_count: gated.len(),
            relative_threshold,
        }
    }
}

/// K-weight each channel and sum squares per sample over the shortest length
fn summed_k_weighted_power(channels: &[&[f32]]) -> Vec<f64> {
    let len = channels.iter().map(|ch| ch.len()).min().unwrap_or(0);
    let mut power = vec![0.0f64; len];

    for channel in channels {
        let weighted = KWeightingFilter::apply(&channel[..len]);
        for (acc, &s) in power.iter_mut().zip(weighted.iter()) {
            *acc += s * s;
        }
    }

    power
}

/// LUFS of every complete block
fn block_loudness(power: &[f64], block_len: usize, hop: usize) -> Vec<f64> {
    if block_len == 0 || hop == 0 || power.len() < block_len {
        return Vec::new();
    }

    let count = (power.len() - block_len) / hop + 1;
    let mut blocks = Vec::with_capacity(count);
    for start in (0..=power.len() - block_len).step_by(hop) {
        let sum: f64 = power[start..start + block_len].iter().sum();
        blocks.push(power_to_lufs(sum / block_len as f64));
    }
    blocks
}

/// Ungated loudness over the last `window` samples (clamped to the length)
fn tail_loudness(power: &[f64], window: usize) -> f64 {
    let len = window.min(power.len());
    if len == 0 {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = power[power.len() - len..].iter().sum();
    power_to_lufs(sum / len as f64)
}

/// Relative-gated loudness and the threshold used, from absolutely gated blocks
fn integrated_loudness(gated: &[f64]) -> (f64, f64) {
    if gated.is_empty() {
        return (f64::NEG_INFINITY, f64::NEG_INFINITY);
    }

    let threshold = energy_mean_lufs(gated) + RELATIVE_GATE_LU;
    let survivors: Vec<f64> = gated.iter().copied().filter(|&l| l >= threshold).collect();

    (energy_mean_lufs(&survivors), threshold)
}

/// Spread between the low and high percentiles of the gated blocks
fn loudness_range(gated: &[f64]) -> f64 {
    if gated.len() <= LRA_MIN_BLOCKS {
        return 0.0;
    }

    let mut sorted = gated.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len() as f64;
    let low = sorted[(n * LRA_LOW_PERCENTILE).floor() as usize];
    let high = sorted[(n * LRA_HIGH_PERCENTILE).floor() as usize];

    (high - low).max(0.0)
}
