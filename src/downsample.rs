//! Time-series downsampling algorithms.
//!
//! Datasets routinely carry tens of thousands of samples, far more than
//! the plot can usefully draw. Two single-pass reductions are provided:
//!
//! - [`uniform_downsample`] picks a fixed-stride grid and injects the
//!   per-channel global extrema so axis scaling stays truthful. Fast,
//!   but a narrow spike between grid points can be skipped.
//! - [`envelope_downsample`] splits the series into buckets and keeps
//!   the per-bucket amplitude min and max, forming a signal envelope.
//!   Guarantees any single-sample spike survives and never exceeds the
//!   requested cap.
//!
//! Both return samples by value from the input with no transformation,
//! and both are the identity when the series already fits the cap.

use std::collections::BTreeSet;

use crate::series::{ChannelKey, Sample};

/// Uniform-stride downsampling with global extrema preservation.
///
/// Selects indices `0, stride, 2*stride, ...` with `stride =
/// ceil(len/cap)`, then adds the index of the global minimum and maximum
/// of every channel (ties resolved to the first occurrence). The output
/// is sorted by original index, so chronological order is preserved.
///
/// The cap is soft: up to 2 extra points per channel may be appended.
/// Callers needing a hard cap should use [`envelope_downsample`].
pub fn uniform_downsample(series: &[Sample], cap: usize) -> Vec<Sample> {
    if cap == 0 || series.len() <= cap {
        return series.to_vec();
    }

    let stride = series.len().div_ceil(cap);

    // BTreeSet gives both deduplication and ascending order
    let mut indices: BTreeSet<usize> = (0..series.len()).step_by(stride).collect();

    // Global extrema per channel. Without these the displayed value range
    // silently shrinks whenever an extremum falls between grid points.
    for key in ChannelKey::ALL {
        let mut min_index = 0;
        let mut max_index = 0;
        let mut min_value = series[0].value(key);
        let mut max_value = min_value;
        for (i, sample) in series.iter().enumerate().skip(1) {
            let value = sample.value(key);
            if value < min_value {
                min_value = value;
                min_index = i;
            }
            if value > max_value {
                max_value = value;
                max_index = i;
            }
        }
        indices.insert(min_index);
        indices.insert(max_index);
    }

    indices.into_iter().map(|i| series[i]).collect()
}

/// Min-max (envelope) downsampling over the composite amplitude.
///
/// The series is partitioned into `ceil(cap/2)` contiguous buckets of
/// equal real-valued width, floored to indices. Each bucket contributes
/// the sample with the smallest and the sample with the largest
/// amplitude (see [`Sample::amplitude`]), emitted in chronological
/// order; a bucket where both fall on the same index contributes one
/// sample. Buckets are chronological, so no final sort is needed and
/// the output length never exceeds `cap`.
pub fn envelope_downsample(series: &[Sample], cap: usize) -> Vec<Sample> {
    if cap == 0 || series.len() <= cap {
        return series.to_vec();
    }

    let num_buckets = cap.div_ceil(2);
    let bucket_size = series.len() as f64 / num_buckets as f64;
    let mut result = Vec::with_capacity(cap);

    for bucket in 0..num_buckets {
        let start = (bucket as f64 * bucket_size).floor() as usize;
        let end = (((bucket + 1) as f64 * bucket_size).floor() as usize).min(series.len());
        // Floor rounding can leave an empty bucket at the tail
        if start >= end {
            continue;
        }

        let mut min_index = start;
        let mut max_index = start;
        let mut min_amplitude = f64::INFINITY;
        let mut max_amplitude = f64::NEG_INFINITY;

        for (offset, sample) in series[start..end].iter().enumerate() {
            let amplitude = sample.amplitude();
            if amplitude < min_amplitude {
                min_amplitude = amplitude;
                min_index = start + offset;
            }
            if amplitude > max_amplitude {
                max_amplitude = amplitude;
                max_index = start + offset;
            }
        }

        // Chronological order within the bucket
        let (first, second) = if min_index <= max_index {
            (min_index, max_index)
        } else {
            (max_index, min_index)
        };
        result.push(series[first]);
        if first != second {
            result.push(series[second]);
        }
    }

    result
}

/// Thin a series to at most `cap` points by keeping every Nth sample.
///
/// Used for compact viewports where even the light-mode output is too
/// dense. No extrema handling; purely presentational.
pub fn stride_thin(series: &[Sample], cap: usize) -> Vec<Sample> {
    if cap == 0 || series.len() <= cap {
        return series.to_vec();
    }
    let stride = series.len().div_ceil(cap);
    series
        .iter()
        .enumerate()
        .filter(|(i, _)| i % stride == 0)
        .map(|(_, sample)| *sample)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a flat series with the given length
    fn flat_series(len: usize) -> Vec<Sample> {
        (0..len)
            .map(|i| Sample {
                timestamp: i as f64,
                emg1: 1.0,
                emg2: 1.0,
                emg3: 1.0,
                emg4: 1.0,
                angle: 1.0,
            })
            .collect()
    }

    fn assert_chronological(series: &[Sample]) {
        for pair in series.windows(2) {
            assert!(
                pair[0].timestamp <= pair[1].timestamp,
                "timestamps must be non-decreasing: {} > {}",
                pair[0].timestamp,
                pair[1].timestamp
            );
        }
    }

    // ============================================
    // Uniform-Stride Downsampler Tests
    // ============================================

    #[test]
    fn test_uniform_identity_under_cap() {
        let series = flat_series(100);
        let out = uniform_downsample(&series, 100);
        assert_eq!(out.len(), 100);
        let out = uniform_downsample(&series, 500);
        assert_eq!(out.len(), 100);
    }

    #[test]
    fn test_uniform_reduces_point_count() {
        let series = flat_series(10_000);
        let out = uniform_downsample(&series, 1500);
        assert!(out.len() <= 1500 + 2 * 5, "soft cap: at most 2 extra per channel");
        assert!(out.len() >= 1000, "should keep a meaningful fraction");
        assert_chronological(&out);
    }

    #[test]
    fn test_uniform_preserves_global_extrema_per_channel() {
        let mut series = flat_series(5000);
        // Extrema placed off the stride grid
        series[1234].emg2 = 99.0;
        series[2345].emg2 = -99.0;
        series[3456].angle = 180.0;

        let out = uniform_downsample(&series, 100);
        assert!(out.iter().any(|s| s.emg2 == 99.0), "global max must survive");
        assert!(out.iter().any(|s| s.emg2 == -99.0), "global min must survive");
        assert!(out.iter().any(|s| s.angle == 180.0));
        assert_chronological(&out);
    }

    #[test]
    fn test_uniform_extrema_ties_first_occurrence() {
        let mut series = flat_series(1000);
        // Both peaks off the stride grid (stride is 100 here)
        series[303].emg1 = 50.0;
        series[707].emg1 = 50.0;

        let out = uniform_downsample(&series, 10);
        let peaks: Vec<&Sample> = out.iter().filter(|s| s.emg1 == 50.0).collect();
        assert_eq!(peaks.len(), 1, "only the first tied extremum is injected");
        assert_eq!(peaks[0].timestamp, 303.0);
    }

    #[test]
    fn test_uniform_no_duplicate_indices() {
        let mut series = flat_series(1000);
        // Extremum on a grid point must not be emitted twice
        series[0].emg1 = 100.0;
        let out = uniform_downsample(&series, 10);
        let on_grid: Vec<&Sample> = out.iter().filter(|s| s.timestamp == 0.0).collect();
        assert_eq!(on_grid.len(), 1);
    }

    // ============================================
    // Envelope Downsampler Tests
    // ============================================

    #[test]
    fn test_envelope_identity_under_cap() {
        let series = flat_series(4000);
        let out = envelope_downsample(&series, 4000);
        assert_eq!(out.len(), 4000);
    }

    #[test]
    fn test_envelope_respects_hard_cap() {
        for len in [4001, 5000, 9999, 100_000] {
            let series = flat_series(len);
            let out = envelope_downsample(&series, 4000);
            assert!(
                out.len() <= 4000,
                "len {} produced {} points, cap is 4000",
                len,
                out.len()
            );
        }
    }

    #[test]
    fn test_envelope_preserves_single_sample_spike() {
        // Flat except one spike; a stride-based reduction could step over
        // it, the envelope must not.
        let mut series = flat_series(10_000);
        series[7777].emg3 = 500.0;

        let out = envelope_downsample(&series, 4000);
        assert!(out.len() <= 4000);
        assert!(
            out.iter().any(|s| s.emg3 == 500.0),
            "spike sample must be retained"
        );
        assert_chronological(&out);
    }

    #[test]
    fn test_envelope_spike_in_angle_channel() {
        let mut series = flat_series(10_000);
        series[123].angle = -400.0;

        let out = envelope_downsample(&series, 4000);
        assert!(out.iter().any(|s| s.angle == -400.0));
    }

    #[test]
    fn test_envelope_flat_series_emits_one_per_bucket() {
        // When min and max amplitude coincide at the same index the bucket
        // contributes a single point.
        let series = flat_series(8000);
        let out = envelope_downsample(&series, 4000);
        assert_eq!(out.len(), 2000, "ceil(4000/2) buckets, one point each");
    }

    #[test]
    fn test_envelope_chronological_within_bucket() {
        // Max before min inside a bucket: output must still be by index
        let mut series = flat_series(1000);
        series[10].emg1 = 90.0; // max amplitude, earlier
        series[20].emg1 = 0.0;
        series[20].emg2 = 0.0;
        series[20].emg3 = 0.0;
        series[20].emg4 = 0.0;
        series[20].angle = 0.0; // min amplitude, later

        let out = envelope_downsample(&series, 4);
        assert_chronological(&out);
    }

    #[test]
    fn test_envelope_empty_series() {
        let out = envelope_downsample(&[], 4000);
        assert!(out.is_empty());
    }

    // ============================================
    // Stride Thinning Tests
    // ============================================

    #[test]
    fn test_stride_thin_identity_under_cap() {
        let series = flat_series(200);
        assert_eq!(stride_thin(&series, 220).len(), 200);
    }

    #[test]
    fn test_stride_thin_caps_output() {
        let series = flat_series(1500);
        let out = stride_thin(&series, 220);
        assert!(out.len() <= 220);
        assert_eq!(out[0].timestamp, 0.0, "first sample is always kept");
        assert_chronological(&out);
    }
}
