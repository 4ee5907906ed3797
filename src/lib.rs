pub mod actors;
pub mod agent;
pub mod classify;
pub mod config;
pub mod samplers;
pub mod sink;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sampled metric value.
///
/// The closed set of numeric variants lets classification and rounding
/// dispatch at compile time instead of inspecting runtime types. Serializes
/// untagged, so the wire sees a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(i64),
    Float(f64),
}

impl MetricValue {
    /// View the value as a float for threshold comparison.
    pub fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Integer(i) => *i as f64,
            MetricValue::Float(f) => *f,
        }
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Integer(value)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Float(value)
    }
}

/// Severity of a reading after classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Ok,
    Warning,
    Critical,
}

/// One sample of a local resource counter.
///
/// Created by a sampler with `state == Severity::Ok`; the state is set exactly
/// once, by the classifier, right before delivery. `service` may carry a
/// compound key such as `"disk /boot"` - threshold lookup only uses the part
/// before the first space.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub service: String,
    pub description: String,
    pub state: Severity,
    pub value: MetricValue,
    pub timestamp: DateTime<Utc>,
}

impl Reading {
    pub fn new(
        service: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<MetricValue>,
    ) -> Self {
        Self {
            service: service.into(),
            description: description.into(),
            state: Severity::default(),
            value: value.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Outbound event, the wire-level contract with the monitoring sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub value: MetricValue,
    pub ttl: f32,
    pub service: String,
    pub description: String,
    pub tags: Vec<String>,
    pub host: String,
    pub state: Severity,
}
