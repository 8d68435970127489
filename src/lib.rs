//! Loudscope - Loudness and Stereo-Field Analysis
//!
//! Loudscope measures decoded audio the way a mastering meter does, but over
//! a complete buffer rather than a live stream:
//! 1. Loudness per ITU-R BS.1770 / EBU R128 (momentary, short-term,
//!    integrated, loudness range), true peak, sample peak, RMS, crest factor
//! 2. Stereo field: phase correlation, mid/side levels, width, balance
//!
//! plus a waveform peak reducer for display and platform loudness
//! compliance checks.
//!
//! # Architecture
//!
//! - `audio`: channel sets (the engine input) and WAV loading for the CLI
//! - `dsp`: biquad and K-weighting filters, level conversions
//! - `analysis`: the individual meters and the `Analyzer` that runs them
//!
//! The engine performs no I/O and keeps no state between calls.

pub mod analysis;
pub mod audio;
pub mod cli;
pub mod config;
pub mod dsp;
pub mod error;

pub use analysis::{analyze, diff, AnalysisResult, Analyzer, Platform};
pub use audio::ChannelSet;
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, Result};
