//! Core sample types and series sanitation.
//!
//! A dataset series is an ordered sequence of timestamped samples across
//! five channels: four EMG amplitude channels and one derived angle
//! channel. The service delivers the series as JSON, and malformed
//! spreadsheet rows can surface as string-typed fields, nulls, NaN or
//! Infinity. [`sanitize_series`] coerces each field to a finite number
//! and drops any sample that fails, so the chart layer never sees a
//! non-finite value.

use serde::Deserialize;
use serde_json::Value as JsonValue;
use strum::AsRefStr;

/// Number of channels in every dataset
pub const CHANNEL_COUNT: usize = 5;

/// The fixed, ordered channel set shared by all datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ChannelKey {
    Emg1,
    Emg2,
    Emg3,
    Emg4,
    Angle,
}

impl ChannelKey {
    /// All channels in display order
    pub const ALL: [ChannelKey; CHANNEL_COUNT] = [
        ChannelKey::Emg1,
        ChannelKey::Emg2,
        ChannelKey::Emg3,
        ChannelKey::Emg4,
        ChannelKey::Angle,
    ];

    /// Position of this channel within [`ChannelKey::ALL`]
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Human-readable channel name for legends and stats tables
    pub fn label(&self) -> &'static str {
        match self {
            ChannelKey::Emg1 => "EMG 1",
            ChannelKey::Emg2 => "EMG 2",
            ChannelKey::Emg3 => "EMG 3",
            ChannelKey::Emg4 => "EMG 4",
            ChannelKey::Angle => "Angle",
        }
    }

    /// Physical unit for display
    pub fn unit(&self) -> &'static str {
        match self {
            ChannelKey::Angle => "deg",
            _ => "mV",
        }
    }

    /// True for the four EMG amplitude channels, false for angle
    pub fn is_emg(&self) -> bool {
        !matches!(self, ChannelKey::Angle)
    }
}

/// One sanitized observation: a timestamp plus one finite value per channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: f64,
    pub emg1: f64,
    pub emg2: f64,
    pub emg3: f64,
    pub emg4: f64,
    pub angle: f64,
}

impl Sample {
    /// Get the value for a channel
    #[inline]
    pub fn value(&self, key: ChannelKey) -> f64 {
        match key {
            ChannelKey::Emg1 => self.emg1,
            ChannelKey::Emg2 => self.emg2,
            ChannelKey::Emg3 => self.emg3,
            ChannelKey::Emg4 => self.emg4,
            ChannelKey::Angle => self.angle,
        }
    }

    /// Composite amplitude: the largest absolute value across all five
    /// channels. The angle channel participates on equal footing with the
    /// EMG channels so that a large excursion in any channel stays visible
    /// after envelope downsampling.
    #[inline]
    pub fn amplitude(&self) -> f64 {
        ChannelKey::ALL
            .iter()
            .map(|key| self.value(*key).abs())
            .fold(0.0, f64::max)
    }
}

/// A sample as delivered by the service, before sanitation.
///
/// Fields are kept as raw JSON values because the service may emit
/// numeric strings or nulls for rows it could not fully parse. Missing
/// fields default to `null` and invalidate the sample.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSample {
    #[serde(default)]
    pub timestamp: JsonValue,
    #[serde(default)]
    pub emg1: JsonValue,
    #[serde(default)]
    pub emg2: JsonValue,
    #[serde(default)]
    pub emg3: JsonValue,
    #[serde(default)]
    pub emg4: JsonValue,
    #[serde(default)]
    pub angle: JsonValue,
}

/// Coerce a raw JSON field to a finite f64, if possible
fn coerce_finite(value: &JsonValue) -> Option<f64> {
    let number = match value {
        JsonValue::Number(n) => n.as_f64()?,
        JsonValue::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Validate and coerce a raw series into finite numeric samples.
///
/// Any sample with a non-numeric or non-finite field is excluded whole;
/// surviving samples keep their relative order. Never fails: a fully
/// malformed series sanitizes to an empty one, which the display layer
/// treats as a legitimate state.
pub fn sanitize_series(raw: &[RawSample]) -> Vec<Sample> {
    let sanitized: Vec<Sample> = raw
        .iter()
        .filter_map(|point| {
            Some(Sample {
                timestamp: coerce_finite(&point.timestamp)?,
                emg1: coerce_finite(&point.emg1)?,
                emg2: coerce_finite(&point.emg2)?,
                emg3: coerce_finite(&point.emg3)?,
                emg4: coerce_finite(&point.emg4)?,
                angle: coerce_finite(&point.angle)?,
            })
        })
        .collect();

    let dropped = raw.len() - sanitized.len();
    if dropped > 0 {
        tracing::warn!("Dropped {} malformed samples during sanitation", dropped);
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(timestamp: JsonValue, value: JsonValue) -> RawSample {
        RawSample {
            timestamp,
            emg1: value.clone(),
            emg2: value.clone(),
            emg3: value.clone(),
            emg4: value.clone(),
            angle: value,
        }
    }

    // ============================================
    // Coercion Tests
    // ============================================

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_finite(&json!(1.5)), Some(1.5));
        assert_eq!(coerce_finite(&json!(-42)), Some(-42.0));
        assert_eq!(coerce_finite(&json!(0)), Some(0.0));
    }

    #[test]
    fn test_coerce_numeric_string() {
        assert_eq!(coerce_finite(&json!("3.25")), Some(3.25));
        assert_eq!(coerce_finite(&json!("  -7 ")), Some(-7.0));
    }

    #[test]
    fn test_coerce_rejects_garbage() {
        assert_eq!(coerce_finite(&json!("abc")), None);
        assert_eq!(coerce_finite(&json!(null)), None);
        assert_eq!(coerce_finite(&json!(true)), None);
        assert_eq!(coerce_finite(&json!([1.0])), None);
    }

    #[test]
    fn test_coerce_rejects_non_finite_string() {
        // "inf" and "NaN" parse as f64 but are not finite
        assert_eq!(coerce_finite(&json!("inf")), None);
        assert_eq!(coerce_finite(&json!("NaN")), None);
    }

    // ============================================
    // Sanitizer Tests
    // ============================================

    #[test]
    fn test_sanitize_drops_whole_sample_on_one_bad_field() {
        let mut series: Vec<RawSample> =
            (0..5).map(|i| raw(json!(i as f64), json!(1.0))).collect();
        series[2].emg3 = json!("not a number");

        let sanitized = sanitize_series(&series);
        assert_eq!(sanitized.len(), 4);
        // Relative order of the survivors is preserved
        let times: Vec<f64> = sanitized.iter().map(|s| s.timestamp).collect();
        assert_eq!(times, vec![0.0, 1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sanitize_coerces_string_fields() {
        let series = vec![raw(json!("0.5"), json!("12.5"))];
        let sanitized = sanitize_series(&series);
        assert_eq!(sanitized.len(), 1);
        assert_eq!(sanitized[0].timestamp, 0.5);
        assert_eq!(sanitized[0].emg1, 12.5);
        assert_eq!(sanitized[0].angle, 12.5);
    }

    #[test]
    fn test_sanitize_fully_invalid_series_is_empty() {
        let series = vec![raw(json!(null), json!(null)); 3];
        assert!(sanitize_series(&series).is_empty());
    }

    #[test]
    fn test_sanitize_empty_series() {
        assert!(sanitize_series(&[]).is_empty());
    }

    // ============================================
    // Sample Tests
    // ============================================

    #[test]
    fn test_sample_value_by_channel() {
        let sample = Sample {
            timestamp: 0.0,
            emg1: 1.0,
            emg2: 2.0,
            emg3: 3.0,
            emg4: 4.0,
            angle: 5.0,
        };
        assert_eq!(sample.value(ChannelKey::Emg1), 1.0);
        assert_eq!(sample.value(ChannelKey::Emg4), 4.0);
        assert_eq!(sample.value(ChannelKey::Angle), 5.0);
    }

    #[test]
    fn test_amplitude_uses_absolute_values() {
        let sample = Sample {
            timestamp: 0.0,
            emg1: -10.0,
            emg2: 2.0,
            emg3: 0.0,
            emg4: 1.0,
            angle: 3.0,
        };
        assert_eq!(sample.amplitude(), 10.0);
    }

    #[test]
    fn test_amplitude_includes_angle_channel() {
        let sample = Sample {
            timestamp: 0.0,
            emg1: 1.0,
            emg2: 1.0,
            emg3: 1.0,
            emg4: 1.0,
            angle: -90.0,
        };
        assert_eq!(sample.amplitude(), 90.0);
    }

    // ============================================
    // ChannelKey Tests
    // ============================================

    #[test]
    fn test_channel_order_and_index() {
        assert_eq!(ChannelKey::ALL.len(), CHANNEL_COUNT);
        for (i, key) in ChannelKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }

    #[test]
    fn test_channel_wire_names() {
        assert_eq!(ChannelKey::Emg1.as_ref(), "emg1");
        assert_eq!(ChannelKey::Angle.as_ref(), "angle");
    }

    #[test]
    fn test_channel_groups() {
        assert!(ChannelKey::Emg1.is_emg());
        assert!(ChannelKey::Emg4.is_emg());
        assert!(!ChannelKey::Angle.is_emg());
    }
}
