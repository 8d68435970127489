//! Loudness and stereo-field analysis
//!
//! Leaf measurements (loudness, true peak, stereo field, waveform peaks) and
//! the [`Analyzer`] that runs them over a [`ChannelSet`](crate::audio::ChannelSet).
//!
//! # Measurements
//! - Momentary, short-term and integrated loudness (LUFS), loudness range (LU)
//! - True peak (dBTP), sample peak and RMS (dBFS), crest factor (dB)
//! - Phase correlation, stereo width, balance, mid/side levels
//! - Waveform peaks for display
//! - Platform loudness compliance

mod analyzer;
pub mod compliance;
pub(crate) mod db_serde;
pub mod loudness;
pub mod stereo;
pub mod true_peak;
pub mod waveform;

pub use analyzer::{analyze, diff, AnalysisDiff, AnalysisResult, Analyzer, LoudnessMetrics};
pub use compliance::{
    check_all_platforms, check_compliance, ComplianceReport, Platform, COMPLIANCE_TOLERANCE_LU,
};
pub use loudness::{LoudnessMeter, LoudnessReading};
pub use stereo::{StereoFieldAnalyzer, StereoMetrics};
pub use true_peak::{TruePeakDetector, TruePeakMode};
pub use waveform::{WaveformPeakReducer, DEFAULT_PEAK_COUNT};
