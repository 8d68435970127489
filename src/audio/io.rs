//! Audio file input
//!
//! Loads WAV files with the hound crate. Only the command-line front end reads
//! files; the analysis engine itself works on in-memory channel sets.

use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::audio::ChannelSet;
use crate::error::{AnalysisError, Result};

/// Load a mono or stereo WAV file into a channel set
///
/// Integer PCM is scaled by `2^(bits - 1)`; float PCM is passed through.
pub fn load_wav<P: AsRef<Path>>(path: P) -> Result<ChannelSet<'static>> {
    let path = path.as_ref();
    let read_error = |source: hound::Error| AnalysisError::AudioReadError {
        path: path.display().to_string(),
        source,
    };

    let reader = WavReader::open(path).map_err(read_error)?;
    let spec = reader.spec();

    if spec.channels > 2 {
        return Err(AnalysisError::UnsupportedChannelCount {
            count: spec.channels,
        });
    }

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map_err(read_error))
            .collect::<Result<Vec<f32>>>()?,
        SampleFormat::Int => {
            let max_val = (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val).map_err(read_error))
                .collect::<Result<Vec<f32>>>()?
        }
    };

    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        "loaded wav"
    );

    ChannelSet::from_interleaved(&samples, spec.channels, spec.sample_rate)
}
