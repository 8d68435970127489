//! Error handling for Loudscope
//!
//! Ordinary signal degeneracy (silence, clipping, mono input, unequal channel
//! lengths) is never an error. Errors are reserved for caller bugs upstream of
//! the engine and for the I/O performed by the command-line front end.

use thiserror::Error;

/// Result type alias for Loudscope operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Main error type for Loudscope operations
#[derive(Error, Debug)]
pub enum AnalysisError {
    // Input Validation Errors
    #[error("Invalid sample rate: {rate} Hz (must be greater than 0)")]
    InvalidSampleRate { rate: u32 },

    #[error("Non-finite sample in {channel} channel at index {index}: {value}")]
    NonFiniteSample {
        channel: &'static str,
        index: usize,
        value: f32,
    },

    #[error("Audio declares zero channels")]
    NoChannels,

    #[error("Unsupported channel count: {count} (only mono and stereo are analyzed)")]
    UnsupportedChannelCount { count: u16 },

    // Compliance Errors
    #[error("Unknown platform: {name}")]
    UnknownPlatform { name: String },

    // Configuration Errors
    #[error("Invalid configuration: {details}")]
    Config { details: String },

    // File Errors
    #[error("Failed to read audio file: {path}")]
    AudioReadError {
        path: String,
        #[source]
        source: hound::Error,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            AnalysisError::InvalidSampleRate { .. } => "INVALID_SAMPLE_RATE",
            AnalysisError::NonFiniteSample { .. } => "NON_FINITE_SAMPLE",
            AnalysisError::NoChannels => "NO_CHANNELS",
            AnalysisError::UnsupportedChannelCount { .. } => "UNSUPPORTED_CHANNEL_COUNT",
            AnalysisError::UnknownPlatform { .. } => "UNKNOWN_PLATFORM",
            AnalysisError::Config { .. } => "CONFIG_ERROR",
            AnalysisError::AudioReadError { .. } => "AUDIO_READ_ERROR",
            AnalysisError::Io(_) => "IO_ERROR",
            AnalysisError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::InvalidSampleRate { .. } => "Pass the sample rate reported by the decoder",
            Self::NonFiniteSample { .. } => {
                "Check the decoding stage; real audio never contains NaN or infinite samples"
            }
            Self::NoChannels | Self::UnsupportedChannelCount { .. } => {
                "Downmix to mono or stereo before analysis"
            }
            Self::UnknownPlatform { .. } => {
                "Use one of: spotify, youtube, appleMusic, amazonMusic, tidal, broadcast, cinema, podcast"
            }
            Self::Config { .. } => "Fix the configuration file and try again",
            Self::AudioReadError { .. } => "Check that the file exists and is a valid WAV file",
            _ => "Check the error details and try again",
        }
    }
}
