//! Value and date formatting
//!
//! Display-time formatting helpers: fixed-precision numeric formatting for
//! readouts, and the date-format collaborator used by the tooltip's
//! last-update row.

use chrono::{DateTime, Utc};

/// Format a value to a fixed number of decimals for display.
pub fn format_value(value: f64, decimals: u32) -> String {
    format!("{:.*}", decimals as usize, value)
}

/// Date-format collaborator: fed a timestamp, read back as display text.
pub trait DateFormatter {
    /// Recompute the formatted text from a unix-epoch millisecond timestamp.
    fn update(&mut self, timestamp_ms: i64);
    /// Currently formatted text.
    fn formatted(&self) -> &str;
}

/// Default [`DateFormatter`] backed by chrono, UTC.
#[derive(Debug, Clone)]
pub struct ChronoDateFormatter {
    pattern: String,
    formatted: String,
}

impl ChronoDateFormatter {
    /// Create a formatter with a chrono format string, e.g.
    /// `"%Y-%m-%d %H:%M:%S"`.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            formatted: String::new(),
        }
    }
}

impl DateFormatter for ChronoDateFormatter {
    fn update(&mut self, timestamp_ms: i64) {
        // Out-of-range timestamps collapse to epoch zero rather than panic.
        let datetime: DateTime<Utc> =
            DateTime::from_timestamp_millis(timestamp_ms).unwrap_or_default();
        self.formatted = datetime.format(&self.pattern).to_string();
    }

    fn formatted(&self) -> &str {
        &self.formatted
    }
}
