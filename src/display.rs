//! Display-ready chart data: mode dispatch over the downsamplers.
//!
//! [`prepare_chart_data`] is a pure function of (sanitized series,
//! display mode, viewport class); the app memoizes its output per
//! [`crate::state::ChartCacheKey`] so an unchanged frame costs nothing.

use crate::downsample::{envelope_downsample, stride_thin, uniform_downsample};
use crate::series::Sample;
use crate::state::{
    DisplayMode, ViewportClass, COMPACT_MAX_POINTS, LIGHT_MAX_POINTS, RENDER_MAX_POINTS,
};

/// The bounded sample sequence handed to the plot, plus the figures the
/// caption needs: how many sanitized samples the dataset really has and
/// whether the displayed sequence was capped.
#[derive(Debug, Clone, Default)]
pub struct ChartData {
    /// Display-ready samples, chronological
    pub samples: Vec<Sample>,
    /// Total sanitized (pre-reduction) sample count
    pub total_points: usize,
    /// True when the render cap forced a reduction
    pub is_capped: bool,
}

impl ChartData {
    /// Empty display state (no dataset, empty series, or fetch failure)
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Reduce a sanitized series for display under the given mode.
///
/// - `Light`: uniform-stride to [`LIGHT_MAX_POINTS`]; compact viewports
///   are additionally thinned to [`COMPACT_MAX_POINTS`].
/// - `Detailed`: pass-through under [`RENDER_MAX_POINTS`], else
///   uniform-stride at that cap.
/// - `Envelope`: pass-through under [`RENDER_MAX_POINTS`], else the
///   min-max envelope at that cap (hard limit).
///
/// The capped flag drives the "showing X of Y" caption; light mode never
/// sets it since its reduction is the mode's baseline, not an overflow.
pub fn prepare_chart_data(
    series: &[Sample],
    mode: DisplayMode,
    viewport: ViewportClass,
) -> ChartData {
    if series.is_empty() {
        return ChartData::empty();
    }
    let total_points = series.len();

    match mode {
        DisplayMode::Light => {
            let downsampled = uniform_downsample(series, LIGHT_MAX_POINTS);
            let samples = if viewport == ViewportClass::Compact
                && downsampled.len() > COMPACT_MAX_POINTS
            {
                stride_thin(&downsampled, COMPACT_MAX_POINTS)
            } else {
                downsampled
            };
            ChartData {
                samples,
                total_points,
                is_capped: false,
            }
        }
        DisplayMode::Detailed => {
            if total_points <= RENDER_MAX_POINTS {
                ChartData {
                    samples: series.to_vec(),
                    total_points,
                    is_capped: false,
                }
            } else {
                ChartData {
                    samples: uniform_downsample(series, RENDER_MAX_POINTS),
                    total_points,
                    is_capped: true,
                }
            }
        }
        DisplayMode::Envelope => {
            if total_points <= RENDER_MAX_POINTS {
                ChartData {
                    samples: series.to_vec(),
                    total_points,
                    is_capped: false,
                }
            } else {
                ChartData {
                    samples: envelope_downsample(series, RENDER_MAX_POINTS),
                    total_points,
                    is_capped: true,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(len: usize) -> Vec<Sample> {
        (0..len)
            .map(|i| Sample {
                timestamp: i as f64 * 0.01,
                emg1: (i as f64).sin(),
                emg2: (i as f64).cos(),
                emg3: 0.5,
                emg4: -0.5,
                angle: 30.0,
            })
            .collect()
    }

    #[test]
    fn test_empty_series_yields_empty_state() {
        let data = prepare_chart_data(&[], DisplayMode::Envelope, ViewportClass::Wide);
        assert!(data.samples.is_empty());
        assert_eq!(data.total_points, 0);
        assert!(!data.is_capped);
    }

    #[test]
    fn test_light_mode_reduces_without_capped_flag() {
        let input = series(10_000);
        let data = prepare_chart_data(&input, DisplayMode::Light, ViewportClass::Wide);
        assert!(data.samples.len() <= LIGHT_MAX_POINTS + 10);
        assert_eq!(data.total_points, 10_000);
        assert!(!data.is_capped);
    }

    #[test]
    fn test_light_mode_compact_thinning() {
        let input = series(10_000);
        let data = prepare_chart_data(&input, DisplayMode::Light, ViewportClass::Compact);
        assert!(data.samples.len() <= COMPACT_MAX_POINTS);
    }

    #[test]
    fn test_detailed_mode_pass_through_under_cap() {
        let input = series(3000);
        let data = prepare_chart_data(&input, DisplayMode::Detailed, ViewportClass::Wide);
        assert_eq!(data.samples.len(), 3000);
        assert!(!data.is_capped);
    }

    #[test]
    fn test_detailed_mode_caps_large_series() {
        let input = series(20_000);
        let data = prepare_chart_data(&input, DisplayMode::Detailed, ViewportClass::Wide);
        assert!(data.samples.len() <= RENDER_MAX_POINTS + 10);
        assert!(data.is_capped);
        assert_eq!(data.total_points, 20_000);
    }

    #[test]
    fn test_envelope_mode_hard_cap() {
        let input = series(20_000);
        let data = prepare_chart_data(&input, DisplayMode::Envelope, ViewportClass::Wide);
        assert!(data.samples.len() <= RENDER_MAX_POINTS);
        assert!(data.is_capped);
    }

    #[test]
    fn test_envelope_mode_pass_through_under_cap() {
        let input = series(4000);
        let data = prepare_chart_data(&input, DisplayMode::Envelope, ViewportClass::Wide);
        assert_eq!(data.samples.len(), 4000);
        assert!(!data.is_capped);
    }
}
