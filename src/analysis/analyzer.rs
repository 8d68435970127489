//! Analysis orchestration
//!
//! Runs every measurement over a channel set and assembles one immutable
//! [`AnalysisResult`]. Analysis is synchronous and keeps no state between
//! calls, so independent calls may run concurrently on separate threads.

use serde::{Deserialize, Serialize};

use crate::analysis::db_serde;
use crate::analysis::loudness::LoudnessMeter;
use crate::analysis::stereo::{StereoFieldAnalyzer, StereoMetrics};
use crate::analysis::true_peak::TruePeakDetector;
use crate::analysis::waveform::WaveformPeakReducer;
use crate::audio::ChannelSet;
use crate::config::AnalyzerConfig;
use crate::dsp::level::{calculate_peak, linear_to_db};
use crate::error::Result;

/// Correlation below which a stereo image is flagged as phase-problematic
const MIN_PHASE_CORRELATION: f64 = 0.0;

/// Loudness and level measurements
///
/// dB and LUFS fields are finite or exactly negative infinity, never NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoudnessMetrics {
    /// Last 400 ms, in LUFS
    #[serde(with = "db_serde")]
    pub momentary: f64,
    /// Last 3 s, in LUFS
    #[serde(with = "db_serde")]
    pub short_term: f64,
    /// Gated programme loudness, in LUFS
    #[serde(with = "db_serde")]
    pub integrated: f64,
    /// Loudness range, in LU
    pub loudness_range: f64,
    /// Estimated true peak, in dBTP
    #[serde(with = "db_serde")]
    pub true_peak: f64,
    /// Largest absolute sample, in dBFS
    #[serde(with = "db_serde")]
    pub sample_peak: f64,
    /// Combined RMS level, in dBFS
    #[serde(with = "db_serde")]
    pub rms: f64,
    /// Sample peak minus RMS, in dB (0 for silence)
    pub crest_factor: f64,
}

/// Complete analysis of one channel set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub loudness: LoudnessMetrics,
    pub stereo: StereoMetrics,
    /// Absolute peaks of the mono mix, one per display bucket
    pub waveform: Vec<f32>,
    /// Duration in seconds
    pub duration: f64,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of input channels
    pub channels: u16,
}

impl AnalysisResult {
    /// Whether no block passed the loudness gates
    pub fn is_silent(&self) -> bool {
        self.loudness.integrated == f64::NEG_INFINITY
    }

    /// Check if stereo has phase issues
    pub fn has_phase_issues(&self) -> bool {
        self.channels == 2 && self.stereo.correlation < MIN_PHASE_CORRELATION
    }

    /// Generate a summary string for display
    pub fn summary(&self) -> String {
        let l = &self.loudness;
        let s = &self.stereo;
        let mut out = format!(
            "Duration: {:.2}s | {} ch @ {} Hz\n\
             Integrated: {} | Short-term: {} | Momentary: {}\n\
             LRA: {:.1} LU | True peak: {} | Sample peak: {}\n\
             RMS: {} | Crest: {:.1} dB",
            self.duration,
            self.channels,
            self.sample_rate,
            format_level(l.integrated, "LUFS"),
            format_level(l.short_term, "LUFS"),
            format_level(l.momentary, "LUFS"),
            l.loudness_range,
            format_level(l.true_peak, "dBTP"),
            format_level(l.sample_peak, "dBFS"),
            format_level(l.rms, "dBFS"),
            l.crest_factor,
        );

        if self.channels == 2 {
            out.push_str(&format!(
                "\nCorrelation: {:.2} | Width: {:.2} | Balance: {:+.2}\n\
                 Mid: {} | Side: {}",
                s.correlation,
                s.width,
                s.balance,
                format_level(s.mid_level, "dBFS"),
                format_level(s.side_level, "dBFS"),
            ));
        }

        if self.has_phase_issues() {
            out.push_str("\nWarning: negative phase correlation");
        }

        out
    }
}

fn format_level(value: f64, unit: &str) -> String {
    if value.is_finite() {
        format!("{:.1} {}", value, unit)
    } else {
        format!("-inf {}", unit)
    }
}

/// Runs the full measurement suite
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Analyzer with default settings (500 waveform peaks, linear true peak)
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer with the given settings
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Active settings
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a channel set
    ///
    /// Fails only on an invalid configuration, a zero sample rate or
    /// non-finite samples. Silence, empty buffers and unequal channel lengths
    /// produce a populated result.
    pub fn analyze(&self, input: &ChannelSet<'_>) -> Result<AnalysisResult> {
        self.config.validate()?;
        input.validate()?;

        let sample_rate = input.sample_rate();
        tracing::debug!(
            channels = input.channel_count(),
            frames = input.num_frames(),
            sample_rate,
            "analysis started"
        );

        if input.has_unequal_lengths() {
            tracing::warn!(
                left = input.left().len(),
                right = input.right().map_or(0, |r| r.len()),
                "channel lengths differ; joint measurements use the shorter channel"
            );
        }

        let channels: Vec<&[f32]> = input.channels().collect();
        let reading = LoudnessMeter::measure(&channels, sample_rate);

        let mode = self.config.true_peak_mode;
        let true_peak_db = channels
            .iter()
            .map(|ch| TruePeakDetector::detect_db(ch, mode))
            .fold(f64::NEG_INFINITY, f64::max);
        let sample_peak = channels
            .iter()
            .map(|ch| calculate_peak(ch))
            .fold(0.0f32, f32::max);

        let stereo = StereoFieldAnalyzer::analyze(input.left(), input.right_or_left());
        let rms = ((stereo.left_rms.powi(2) + stereo.right_rms.powi(2)) / 2.0).sqrt();

        let sample_peak_db = linear_to_db(sample_peak as f64);
        let rms_db = linear_to_db(rms);

        let waveform = WaveformPeakReducer::reduce(&input.mono_mix(), self.config.waveform_peaks);

        let result = AnalysisResult {
            loudness: LoudnessMetrics {
                momentary: reading.momentary,
                short_term: reading.short_term,
                integrated: reading.integrated,
                loudness_range: reading.loudness_range,
                true_peak: true_peak_db,
                sample_peak: sample_peak_db,
                rms: rms_db,
                crest_factor: crest_factor_db(sample_peak_db, rms_db),
            },
            stereo,
            waveform,
            duration: input.duration(),
            sample_rate,
            channels: input.channel_count(),
        };

        tracing::debug!(
            integrated = result.loudness.integrated,
            true_peak = result.loudness.true_peak,
            correlation = result.stereo.correlation,
            "analysis finished"
        );

        Ok(result)
    }
}

/// Analyze a channel set with default settings
pub fn analyze(input: &ChannelSet<'_>) -> Result<AnalysisResult> {
    Analyzer::new().analyze(input)
}

/// Peak-to-RMS ratio in dB
///
/// Zero when either level is -inf. Clamped at zero because peak >= RMS, and
/// only rounding can push the difference below it.
fn crest_factor_db(peak_db: f64, rms_db: f64) -> f64 {
    if peak_db.is_finite() && rms_db.is_finite() {
        (peak_db - rms_db).max(0.0)
    } else {
        0.0
    }
}

/// Differences between two analyses
///
/// Serialize-only: a loudness difference against a silent programme is
/// `+inf`, which JSON writes as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisDiff {
    /// |integrated(a) - integrated(b)| in LU
    pub loudness_diff: f64,
    /// |correlation(a) - correlation(b)|
    pub correlation_diff: f64,
    /// |width(a) - width(b)|
    pub width_diff: f64,
    /// Spectral difference, when a caller supplies one
    pub spectral_diff: Option<f64>,
}

impl AnalysisDiff {
    /// Attach a spectral difference computed outside the engine
    pub fn with_spectral_diff(mut self, spectral_diff: f64) -> Self {
        self.spectral_diff = Some(spectral_diff);
        self
    }
}

/// Compare two analyses
///
/// Two silent programmes differ by 0 LU; silent against audible is `+inf`.
pub fn diff(a: &AnalysisResult, b: &AnalysisResult) -> AnalysisDiff {
    AnalysisDiff {
        loudness_diff: abs_diff(a.loudness.integrated, b.loudness.integrated),
        correlation_diff: abs_diff(a.stereo.correlation, b.stereo.correlation),
        width_diff: abs_diff(a.stereo.width, b.stereo.width),
        spectral_diff: None,
    }
}

fn abs_diff(a: f64, b: f64) -> f64 {
    if a == b {
        0.0
    } else {
        (a - b).abs()
    }
}
