//! Dates
//!
//! A `Date` is a mutable millisecond timestamp since the Unix epoch.
//! NaN marks an invalid date.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

/// Largest representable time value (±100,000,000 days)
const MAX_TIME_MS: f64 = 8.64e15;

/// A date value
pub struct Date {
    time: RwLock<f64>,
}

impl Date {
    /// Create a date from milliseconds since the epoch
    pub fn from_timestamp_ms(ms: f64) -> Self {
        Self {
            time: RwLock::new(time_clip(ms)),
        }
    }

    /// Current wall-clock time
    pub fn now() -> Arc<Self> {
        Arc::new(Self::from_timestamp_ms(Utc::now().timestamp_millis() as f64))
    }

    /// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
    /// (read as UTC) or a bare `YYYY-MM-DD` (UTC midnight).
    ///
    /// Unparseable input yields an invalid date, never an error.
    pub fn parse(input: &str) -> Arc<Self> {
        let input = input.trim();
        let ms = if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            dt.timestamp_millis() as f64
        } else if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
            naive.and_utc().timestamp_millis() as f64
        } else if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            day.and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis() as f64)
                .unwrap_or(f64::NAN)
        } else {
            f64::NAN
        };
        Arc::new(Self::from_timestamp_ms(ms))
    }

    /// Milliseconds since the epoch (NaN if invalid)
    pub fn time(&self) -> f64 {
        *self.time.read()
    }

    /// Replace the timestamp
    pub fn set_time(&self, ms: f64) {
        *self.time.write() = time_clip(ms);
    }

    /// Check if the date holds a valid time
    pub fn is_valid(&self) -> bool {
        !self.time().is_nan()
    }

    /// ISO 8601 rendering with millisecond precision, `None` if invalid
    pub fn to_iso_string(&self) -> Option<String> {
        let t = self.time();
        if t.is_nan() {
            return None;
        }
        DateTime::<Utc>::from_timestamp_millis(t as i64)
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
    }
}

/// TimeClip: non-finite or out of range becomes NaN, fractions truncate
fn time_clip(ms: f64) -> f64 {
    if !ms.is_finite() || ms.abs() > MAX_TIME_MS {
        return f64::NAN;
    }
    ms.trunc() + 0.0
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_iso_string() {
            Some(iso) => write!(f, "Date({})", iso),
            None => write!(f, "Date(Invalid)"),
        }
    }
}
