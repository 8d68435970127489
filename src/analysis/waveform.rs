//! Waveform peak reduction for display

/// Number of peaks produced for an analysis result
pub const DEFAULT_PEAK_COUNT: usize = 500;

/// Reduces a mono signal to a fixed number of absolute peaks
pub struct WaveformPeakReducer;

impl WaveformPeakReducer {
    /// Split `mono` into `peak_count` windows of `len / peak_count` samples and
    /// return each window's maximum absolute value
    ///
    /// Always returns exactly `peak_count` values. Samples past the last full
    /// window are ignored; when the signal is shorter than `peak_count` every
    /// window is empty and reads 0.
    pub fn reduce(mono: &[f32], peak_count: usize) -> Vec<f32> {
        if peak_count == 0 {
            return Vec::new();
        }

        let window = mono.len() / peak_count;
        if window == 0 {
            return vec![0.0; peak_count];
        }

        mono.chunks_exact(window)
            .take(peak_count)
            .map(|chunk| chunk.iter().map(|s| s.abs()).fold(0.0f32, f32::max))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_count() {
        for len in [0usize, 1, 499, 500, 501, 44100] {
            let mono = vec![0.25f32; len];
            assert_eq!(WaveformPeakReducer::reduce(&mono, 500).len(), 500, "len {}", len);
        }
    }

    #[test]
    fn test_short_input_is_all_zero() {
        let peaks = WaveformPeakReducer::reduce(&[0.9, -0.8, 0.7], 10);
        assert_eq!(peaks, vec![0.0; 10]);
    }

    #[test]
    fn test_window_maxima() {
        let mono = [0.1, -0.5, 0.2, 0.3, -0.05, 0.0, 0.9];
        // Window of 2; the trailing 0.9 falls outside the last full window
        let peaks = WaveformPeakReducer::reduce(&mono, 3);
        assert_eq!(peaks, vec![0.5, 0.3, 0.05]);
    }

    #[test]
    fn test_zero_peaks() {
        assert!(WaveformPeakReducer::reduce(&[0.5; 10], 0).is_empty());
    }

    #[test]
    fn test_peaks_non_negative() {
        let mono: Vec<f32> = (0..1000).map(|i| -((i % 7) as f32) / 7.0).collect();
        assert!(WaveformPeakReducer::reduce(&mono, 50).iter().all(|&p| p >= 0.0));
    }
}
