//! Core data types for the tickforge pipeline.

use chrono::{DateTime, NaiveDateTime, NaiveTime};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Timestamp in milliseconds since Unix epoch.
///
/// Source timestamps are naive wall-clock instants in the fixed reference
/// timezone; they are converted to millisecond integers at the parse boundary
/// and stay integers through the whole pipeline.
pub type TimestampMs = i64;

/// Price type with ordering support (sort key over f64 prices).
pub type Price = OrderedFloat<f64>;

/// Size/quantity type (whole units traded).
pub type Size = u64;

/// Timestamp format used by source files and bar output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Parse a `YYYY-MM-DD HH:MM:SS.sss` timestamp into epoch milliseconds.
pub fn parse_timestamp_ms(s: &str) -> Option<TimestampMs> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .ok()
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Format epoch milliseconds back to `YYYY-MM-DD HH:MM:SS.sss`.
pub fn format_timestamp_ms(ts_ms: TimestampMs) -> String {
    match DateTime::from_timestamp_millis(ts_ms) {
        Some(dt) => dt.naive_utc().format(TIMESTAMP_FORMAT).to_string(),
        None => ts_ms.to_string(),
    }
}

/// Extract the wall-clock time-of-day from a millisecond timestamp.
pub fn time_of_day(ts_ms: TimestampMs) -> Option<NaiveTime> {
    DateTime::from_timestamp_millis(ts_ms).map(|dt| dt.naive_utc().time())
}

/// One raw record as read from a source file, before any validation.
///
/// Fields are kept as trimmed strings; a missing field is an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRow {
    pub timestamp: String,
    pub price: String,
    pub size: String,
}

/// A single validated trade record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Timestamp in milliseconds.
    pub ts_ms: TimestampMs,
    /// Trade price.
    pub price: f64,
    /// Trade size (whole units).
    pub size: Size,
}

/// Inclusive price bounds derived from the dataset's price distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBounds {
    /// Lower bound (Q1 - k * IQR).
    pub lower: f64,
    /// Upper bound (Q3 + k * IQR).
    pub upper: f64,
}

impl PriceBounds {
    /// Whether a price falls within the bounds.
    #[inline]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.lower && price <= self.upper
    }
}

/// An OHLCV bar aggregated over one fixed interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvBar {
    /// Interval start timestamp (ms, inclusive).
    pub start_ms: TimestampMs,
    /// Interval end timestamp (ms, exclusive).
    pub end_ms: TimestampMs,
    /// First member tick's price in timestamp order.
    pub open: f64,
    /// Maximum member price.
    pub high: f64,
    /// Minimum member price.
    pub low: f64,
    /// Last member tick's price in timestamp order.
    pub close: f64,
    /// Sum of member sizes.
    pub volume: Size,
}
