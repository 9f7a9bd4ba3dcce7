//! Client-side aggregate statistics.
//!
//! The dataset service precomputes per-channel mean and max plus a peak
//! count, but not the minimum. [`channel_minima`] fills that gap with a
//! single linear pass over the full sanitized series — never over a
//! downsampled subset, since downsampling is a presentation-only
//! reduction and must not influence summary figures.

use crate::series::{ChannelKey, Sample, CHANNEL_COUNT};

/// Per-channel minima over a sanitized series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelMinima {
    values: [f64; CHANNEL_COUNT],
}

impl ChannelMinima {
    /// Minimum value for a channel
    #[inline]
    pub fn get(&self, key: ChannelKey) -> f64 {
        self.values[key.index()]
    }
}

/// Compute the true minimum of every channel over the full series.
///
/// Returns `None` for an empty series (including a series whose samples
/// were all dropped by sanitation); that is a display state, not an
/// error.
pub fn channel_minima(series: &[Sample]) -> Option<ChannelMinima> {
    let first = series.first()?;

    let mut values = [0.0; CHANNEL_COUNT];
    for key in ChannelKey::ALL {
        values[key.index()] = first.value(key);
    }
    for sample in &series[1..] {
        for key in ChannelKey::ALL {
            let value = sample.value(key);
            if value < values[key.index()] {
                values[key.index()] = value;
            }
        }
    }

    Some(ChannelMinima { values })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(timestamp: f64, base: f64) -> Sample {
        Sample {
            timestamp,
            emg1: base,
            emg2: base + 1.0,
            emg3: base + 2.0,
            emg4: base + 3.0,
            angle: base + 4.0,
        }
    }

    #[test]
    fn test_minima_empty_series_is_none() {
        assert!(channel_minima(&[]).is_none());
    }

    #[test]
    fn test_minima_single_sample() {
        let minima = channel_minima(&[sample(0.0, 10.0)]).unwrap();
        assert_eq!(minima.get(ChannelKey::Emg1), 10.0);
        assert_eq!(minima.get(ChannelKey::Angle), 14.0);
    }

    #[test]
    fn test_minima_known_injected_minimum() {
        // 1000 samples with a known minimum injected at a known index,
        // independently per channel
        let mut series: Vec<Sample> = (0..1000).map(|i| sample(i as f64, 100.0)).collect();
        series[137].emg1 = -5.0;
        series[421].emg2 = -6.0;
        series[555].emg3 = -7.0;
        series[800].emg4 = -8.0;
        series[999].angle = -9.0;

        let minima = channel_minima(&series).unwrap();
        assert_eq!(minima.get(ChannelKey::Emg1), -5.0);
        assert_eq!(minima.get(ChannelKey::Emg2), -6.0);
        assert_eq!(minima.get(ChannelKey::Emg3), -7.0);
        assert_eq!(minima.get(ChannelKey::Emg4), -8.0);
        assert_eq!(minima.get(ChannelKey::Angle), -9.0);
    }

    #[test]
    fn test_minima_independent_of_display_reduction() {
        // Downsampling the same series must not change the aggregate:
        // minima always run over the full input.
        let mut series: Vec<Sample> = (0..10_000).map(|i| sample(i as f64, 50.0)).collect();
        series[9_337].emg2 = -123.0;

        let full = channel_minima(&series).unwrap();
        let reduced = crate::downsample::uniform_downsample(&series, 100);
        assert!(reduced.len() < series.len());
        assert_eq!(full.get(ChannelKey::Emg2), -123.0);
    }

    #[test]
    fn test_minima_all_negative() {
        let series: Vec<Sample> = (0..10).map(|i| sample(i as f64, -(i as f64))).collect();
        let minima = channel_minima(&series).unwrap();
        assert_eq!(minima.get(ChannelKey::Emg1), -9.0);
        assert_eq!(minima.get(ChannelKey::Angle), -5.0);
    }
}
