//! Threshold classification for readings.
//!
//! Classification is a pure step applied by the reporter right before
//! delivery: round float values to two decimal places, look up the threshold
//! for the reading's base service name, and compare with a strict upper bound.

use std::collections::HashMap;

use crate::{MetricValue, Reading, Severity, config::Threshold};

/// Round `f` to `places` decimal places, half up via floor.
///
/// `floor(f * 10^places + 0.5) / 10^places`, so `2.5` at zero places rounds
/// to `3` and `-2.5` rounds to `-2`. Not banker's rounding.
pub fn round_plus(f: f64, places: i32) -> f64 {
    let shift = 10f64.powi(places);
    (f * shift + 0.5).floor() / shift
}

/// Extract the threshold lookup key from a service name.
///
/// `"disk /boot"` resolves under `"disk"`, `"cpu"` under `"cpu"`.
pub fn service_key(service: &str) -> &str {
    service
        .split(char::is_whitespace)
        .next()
        .unwrap_or(service)
}

/// Classify a reading against the configured thresholds.
///
/// Float values are rounded to two decimal places first; integers are left
/// untouched. Without a threshold for the service key the state stays at its
/// default. With one, the comparison is strictly greater-than, so a value
/// sitting exactly on a boundary resolves to the lower severity.
pub fn classify(mut reading: Reading, thresholds: &HashMap<String, Threshold>) -> Reading {
    if let MetricValue::Float(f) = reading.value {
        reading.value = MetricValue::Float(round_plus(f, 2));
    }

    let Some(threshold) = thresholds.get(service_key(&reading.service)) else {
        return reading;
    };

    let value = reading.value.as_f64();
    reading.state = if value > threshold.critical {
        Severity::Critical
    } else if value > threshold.warning {
        Severity::Warning
    } else {
        Severity::Ok
    };

    reading
}
