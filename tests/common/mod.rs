//! Common test utilities shared across all test modules
//!
//! Helpers for building synthetic sample series and raw service
//! payloads without talking to a live dataset service.

use myoview::series::{RawSample, Sample};

/// A flat sample at `timestamp` with every channel set to `value`
pub fn flat_sample(timestamp: f64, value: f64) -> Sample {
    Sample {
        timestamp,
        emg1: value,
        emg2: value,
        emg3: value,
        emg4: value,
        angle: value,
    }
}

/// A smooth synthetic series of the given length (10 ms sampling)
pub fn smooth_series(len: usize) -> Vec<Sample> {
    (0..len)
        .map(|i| {
            let t = i as f64 * 0.01;
            Sample {
                timestamp: t,
                emg1: (t * 2.0).sin(),
                emg2: (t * 3.0).cos(),
                emg3: (t * 0.5).sin() * 0.3,
                emg4: 0.1,
                angle: 45.0 + (t * 0.2).sin() * 10.0,
            }
        })
        .collect()
}

/// Serialize a sample series into the wire shape the service sends,
/// then parse it back into raw samples
pub fn to_raw(series: &[Sample]) -> Vec<RawSample> {
    let json = serde_json::to_string(
        &series
            .iter()
            .map(|s| {
                serde_json::json!({
                    "timestamp": s.timestamp,
                    "emg1": s.emg1,
                    "emg2": s.emg2,
                    "emg3": s.emg3,
                    "emg4": s.emg4,
                    "angle": s.angle,
                })
            })
            .collect::<Vec<_>>(),
    )
    .expect("serialize test series");
    serde_json::from_str(&json).expect("parse test series")
}
