//! Time-window parsing and boundary validation.
//!
//! Pure functions: the caller owns any prompting/retry loop. Validation
//! enforces the constraints the aggregation core consumes as preconditions.

use tickforge_core::config::SessionConfig;
use tickforge_core::{
    format_timestamp_ms, parse_timestamp_ms, time_of_day, Error, Result, TimestampMs,
};

/// A millisecond-precise query window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Window start (inclusive).
    pub start_ms: TimestampMs,
    /// Window end.
    pub end_ms: TimestampMs,
}

impl Window {
    /// Create a window from raw millisecond instants.
    pub fn new(start_ms: TimestampMs, end_ms: TimestampMs) -> Self {
        Self { start_ms, end_ms }
    }

    /// Parse a window from two `YYYY-MM-DD HH:MM:SS.sss` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start_ms = parse_timestamp_ms(start).ok_or_else(|| {
            Error::invalid_window(format!(
                "start time {start:?} is not of the form YYYY-MM-DD HH:MM:SS.sss"
            ))
        })?;
        let end_ms = parse_timestamp_ms(end).ok_or_else(|| {
            Error::invalid_window(format!(
                "end time {end:?} is not of the form YYYY-MM-DD HH:MM:SS.sss"
            ))
        })?;
        Ok(Self { start_ms, end_ms })
    }

    /// Enforce the boundary constraints on a window request.
    ///
    /// The start must precede the end, the end must not pass the last
    /// indexed timestamp, and both endpoints must fall inside the trading
    /// session.
    pub fn validate(&self, last_ts: TimestampMs, session: &SessionConfig) -> Result<()> {
        if self.start_ms >= self.end_ms {
            return Err(Error::invalid_window("start time must be before end time"));
        }
        if self.end_ms > last_ts {
            return Err(Error::invalid_window(format!(
                "end time {} is past the last available timestamp {}",
                format_timestamp_ms(self.end_ms),
                format_timestamp_ms(last_ts)
            )));
        }
        for (name, ts) in [("start", self.start_ms), ("end", self.end_ms)] {
            let in_session = time_of_day(ts).is_some_and(|t| session.contains(t));
            if !in_session {
                return Err(Error::invalid_window(format!(
                    "{name} time {} is outside the trading session {}-{}",
                    format_timestamp_ms(ts),
                    session.open,
                    session.close
                )));
            }
        }
        Ok(())
    }
}
