//! Channel set implementation
//!
//! A `ChannelSet` holds one (mono) or two (stereo) decoded sample buffers that
//! share a sample rate. It can borrow the caller's buffers or own its own; the
//! engine never keeps either past the end of an analysis call.

use std::borrow::Cow;

use crate::error::{AnalysisError, Result};

/// One or two channels of de-interleaved samples at a common sample rate
#[derive(Debug, Clone)]
pub struct ChannelSet<'a> {
    /// Left (or only) channel, nominally in -1.0..1.0
    left: Cow<'a, [f32]>,
    /// Right channel; `None` for mono
    right: Option<Cow<'a, [f32]>>,
    /// Sample rate in Hz
    sample_rate: u32,
}

impl<'a> ChannelSet<'a> {
    /// Create a mono channel set
    pub fn mono(samples: impl Into<Cow<'a, [f32]>>, sample_rate: u32) -> Self {
        Self {
            left: samples.into(),
            right: None,
            sample_rate,
        }
    }

    /// Create a stereo channel set
    ///
    /// Channels may differ in length; joint computations are bounded by the
    /// shorter one.
    pub fn stereo(
        left: impl Into<Cow<'a, [f32]>>,
        right: impl Into<Cow<'a, [f32]>>,
        sample_rate: u32,
    ) -> Self {
        Self {
            left: left.into(),
            right: Some(right.into()),
            sample_rate,
        }
    }

    /// Left (or only) channel
    pub fn left(&self) -> &[f32] {
        &self.left
    }

    /// Right channel, if stereo
    pub fn right(&self) -> Option<&[f32]> {
        self.right.as_deref()
    }

    /// Right channel, falling back to the left channel for mono input
    pub fn right_or_left(&self) -> &[f32] {
        self.right.as_deref().unwrap_or(&self.left)
    }

    /// Iterate over the channels that are present
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        std::iter::once(self.left()).chain(self.right())
    }

    /// Number of channels (1 or 2)
    pub fn channel_count(&self) -> u16 {
        if self.right.is_some() {
            2
        } else {
            1
        }
    }

    /// Whether two channels are present
    pub fn is_stereo(&self) -> bool {
        self.right.is_some()
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Length that bounds joint (stereo) computations
    pub fn shared_len(&self) -> usize {
        match &self.right {
            Some(right) => self.left.len().min(right.len()),
            None => self.left.len(),
        }
    }

    /// Length of the longest channel
    pub fn num_frames(&self) -> usize {
        match &self.right {
            Some(right) => self.left.len().max(right.len()),
            None => self.left.len(),
        }
    }

    /// Duration in seconds, based on the longest channel
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_frames() as f64 / self.sample_rate as f64
    }

    /// Whether the channels have different lengths
    pub fn has_unequal_lengths(&self) -> bool {
        self.right
            .as_ref()
            .is_some_and(|right| right.len() != self.left.len())
    }

    /// Check the preconditions the analysis engine relies on
    ///
    /// Fails on a zero sample rate or on the first NaN/infinite sample.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(AnalysisError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }

        check_finite(&self.left, "left")?;
        if let Some(right) = &self.right {
            check_finite(right, "right")?;
        }

        Ok(())
    }

    /// Mix down to mono over the shared length
    ///
    /// Stereo is the element-wise average of left and right; mono is a copy of
    /// the left channel.
    pub fn mono_mix(&self) -> Vec<f32> {
        match &self.right {
            Some(right) => self
                .left
                .iter()
                .zip(right.iter())
                .map(|(&l, &r)| ((l as f64 + r as f64) * 0.5) as f32)
                .collect(),
            None => self.left.to_vec(),
        }
    }

    /// Detach from any borrowed buffers
    pub fn into_owned(self) -> ChannelSet<'static> {
        ChannelSet {
            left: Cow::Owned(self.left.into_owned()),
            right: self.right.map(|r| Cow::Owned(r.into_owned())),
            sample_rate: self.sample_rate,
        }
    }
}

impl ChannelSet<'static> {
    /// Split interleaved samples (`[L0, R0, L1, R1, ...]`) into a channel set
    ///
    /// A trailing partial frame is dropped.
    pub fn from_interleaved(samples: &[f32], channels: u16, sample_rate: u32) -> Result<Self> {
        match channels {
            0 => Err(AnalysisError::NoChannels),
            1 => Ok(Self::mono(samples.to_vec(), sample_rate)),
            2 => {
                let frames = samples.len() / 2;
                let mut left = Vec::with_capacity(frames);
                let mut right = Vec::with_capacity(frames);
                for frame in samples.chunks_exact(2) {
                    left.push(frame[0]);
                    right.push(frame[1]);
                }
                Ok(Self::stereo(left, right, sample_rate))
            }
            count => Err(AnalysisError::UnsupportedChannelCount { count }),
        }
    }

    /// Create a silent channel set with the given duration
    pub fn silence(duration_secs: f64, channels: u16, sample_rate: u32) -> Self {
        let num_samples = (duration_secs * sample_rate as f64) as usize;
        if channels >= 2 {
            Self::stereo(vec![0.0; num_samples], vec![0.0; num_samples], sample_rate)
        } else {
            Self::mono(vec![0.0; num_samples], sample_rate)
        }
    }

    /// Create a mono sine wave test tone at the given peak amplitude
    pub fn sine_wave(frequency: f64, amplitude: f32, duration_secs: f64, sample_rate: u32) -> Self {
        let num_samples = (duration_secs * sample_rate as f64) as usize;
        let samples = (0..num_samples)
            .map(|i| {
                let t = i as f64 / sample_rate as f64;
                amplitude * (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
            })
            .collect::<Vec<f32>>();

        Self::mono(samples, sample_rate)
    }
}

fn check_finite(samples: &[f32], channel: &'static str) -> Result<()> {
    match samples.iter().position(|s| !s.is_finite()) {
        Some(index) => Err(AnalysisError::NonFiniteSample {
            channel,
            index,
            value: samples[index],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_wave_generation() {
        let set = ChannelSet::sine_wave(440.0, 1.0, 1.0, 44100);
        assert_eq!(set.channel_count(), 1);
        assert_eq!(set.sample_rate(), 44100);
        assert_eq!(set.num_frames(), 44100);
        assert!((set.duration() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_silence_generation() {
        let set = ChannelSet::silence(2.0, 2, 48000);
        assert!(set.is_stereo());
        assert_eq!(set.num_frames(), 96000);
        assert!(set.channels().all(|ch| ch.iter().all(|&s| s == 0.0)));
    }

    #[test]
    fn test_channel_extraction() {
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]; // L, R, L, R, L, R
        let set = ChannelSet::from_interleaved(&samples, 2, 44100).unwrap();

        assert_eq!(set.left(), &[1.0, 3.0, 5.0]);
        assert_eq!(set.right(), Some(&[2.0, 4.0, 6.0][..]));
    }

    #[test]
    fn test_interleaved_rejects_surround() {
        let result = ChannelSet::from_interleaved(&[0.0; 12], 6, 48000);
        assert!(matches!(
            result,
            Err(AnalysisError::UnsupportedChannelCount { count: 6 })
        ));

        let result = ChannelSet::from_interleaved(&[0.0; 4], 0, 48000);
        assert!(matches!(result, Err(AnalysisError::NoChannels)));
    }

    #[test]
    fn test_shared_len_uses_shorter_channel() {
        let left = [0.1f32; 10];
        let right = [0.2f32; 7];
        let set = ChannelSet::stereo(&left[..], &right[..], 8000);

        assert_eq!(set.shared_len(), 7);
        assert_eq!(set.num_frames(), 10);
        assert!(set.has_unequal_lengths());
        assert_eq!(set.mono_mix().len(), 7);
    }

    #[test]
    fn test_mono_mix_averages() {
        let set = ChannelSet::stereo(vec![1.0, 0.5], vec![0.0, -0.5], 8000);
        assert_eq!(set.mono_mix(), vec![0.5, 0.0]);

        let mono = ChannelSet::mono(vec![0.25, -0.25], 8000);
        assert_eq!(mono.mono_mix(), vec![0.25, -0.25]);
        assert_eq!(mono.right_or_left(), mono.left());
    }

    #[test]
    fn test_mono_mix_full_scale_does_not_overflow() {
        let set = ChannelSet::stereo(vec![f32::MAX], vec![f32::MAX], 8000);
        assert_eq!(set.mono_mix(), vec![f32::MAX]);
    }

    #[test]
    fn test_validate_rejects_zero_rate() {
        let set = ChannelSet::mono(vec![0.0; 4], 0);
        assert!(matches!(
            set.validate(),
            Err(AnalysisError::InvalidSampleRate { rate: 0 })
        ));
    }

    #[test]
    fn test_validate_reports_first_non_finite() {
        let set = ChannelSet::stereo(vec![0.0; 4], vec![0.0, 0.1, f32::INFINITY, f32::NAN], 48000);
        match set.validate() {
            Err(AnalysisError::NonFiniteSample { channel, index, .. }) => {
                assert_eq!(channel, "right");
                assert_eq!(index, 2);
            }
            other => panic!("expected NonFiniteSample, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_buffers_are_valid() {
        let set = ChannelSet::stereo(Vec::new(), Vec::new(), 44100);
        assert!(set.validate().is_ok());
        assert_eq!(set.duration(), 0.0);
    }
}
