//! Measurement stream data model
//!
//! One sample per data point, delivered by the hosting dashboard's
//! subscription callback. The value slot is an explicit three-way variant so
//! the orchestrator's branches (abort / "not available" / render) are
//! exhaustive instead of hinging on nullable access.

use serde::{Deserialize, Serialize};

/// The value slot of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SampleValue {
    /// No value was delivered at all; the visual update for this tick is
    /// skipped entirely
    Absent,
    /// A value was delivered but is not numeric; renders as "not available"
    /// with the liquid at 0%
    Invalid,
    /// A usable numeric reading
    Numeric(f64),
}

impl SampleValue {
    /// Map a raw JSON telemetry payload onto the three-way variant:
    /// missing/null → `Absent`, numbers and numeric strings → `Numeric`,
    /// anything else → `Invalid`.
    pub fn from_json(value: Option<&serde_json::Value>) -> Self {
        match value {
            None | Some(serde_json::Value::Null) => Self::Absent,
            Some(serde_json::Value::Number(n)) => match n.as_f64() {
                Some(v) => Self::Numeric(v),
                None => Self::Invalid,
            },
            Some(serde_json::Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(v) => Self::Numeric(v),
                Err(_) => Self::Invalid,
            },
            Some(_) => Self::Invalid,
        }
    }

    /// The numeric reading, if this sample has one.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            _ => None,
        }
    }
}

/// A single timestamped reading from the data stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelSample {
    /// Unix-epoch milliseconds of the reading
    pub timestamp_ms: i64,
    /// The reading itself
    pub value: SampleValue,
}

impl LevelSample {
    /// Sample with a numeric reading.
    pub fn numeric(timestamp_ms: i64, value: f64) -> Self {
        Self {
            timestamp_ms,
            value: SampleValue::Numeric(value),
        }
    }

    /// Sample whose value slot was delivered but is not numeric.
    pub fn invalid(timestamp_ms: i64) -> Self {
        Self {
            timestamp_ms,
            value: SampleValue::Invalid,
        }
    }

    /// Sample with no value slot at all.
    pub fn absent(timestamp_ms: i64) -> Self {
        Self {
            timestamp_ms,
            value: SampleValue::Absent,
        }
    }
}
