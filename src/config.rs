//! Analyzer configuration
//!
//! Only presentation-level knobs are configurable. Gating constants, filter
//! coefficients and platform targets are fixed by the standards they
//! implement.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{TruePeakMode, DEFAULT_PEAK_COUNT};
use crate::error::{AnalysisError, Result};

/// Settings for an [`Analyzer`](crate::analysis::Analyzer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Number of waveform peaks in each result
    pub waveform_peaks: usize,
    /// True-peak interpolation
    pub true_peak_mode: TruePeakMode,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            waveform_peaks: DEFAULT_PEAK_COUNT,
            true_peak_mode: TruePeakMode::Linear,
        }
    }
}

impl AnalyzerConfig {
    /// Load and validate a JSON configuration file
    ///
    /// Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check configuration values
    pub fn validate(&self) -> Result<()> {
        if self.waveform_peaks == 0 {
            return Err(AnalysisError::Config {
                details: "waveform_peaks must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
