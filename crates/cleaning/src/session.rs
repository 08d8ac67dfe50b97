//! Optional trading-session filtering.
//!
//! Timestamps are naive wall-clock instants in the fixed reference timezone,
//! so the session check compares time-of-day directly.

use tracing::debug;

use tickforge_core::config::SessionConfig;
use tickforge_core::{time_of_day, Tick};

/// Drops ticks whose time-of-day falls outside the trading session.
pub struct SessionFilter {
    session: SessionConfig,
}

impl SessionFilter {
    /// Create a filter for the given session hours.
    pub fn new(session: SessionConfig) -> Self {
        Self { session }
    }

    /// Whether a tick falls inside the session.
    pub fn contains(&self, tick: &Tick) -> bool {
        time_of_day(tick.ts_ms).is_some_and(|t| self.session.contains(t))
    }

    /// Apply the session filter to every tick.
    ///
    /// Returns the surviving ticks and the number dropped.
    pub fn apply(&self, ticks: Vec<Tick>) -> (Vec<Tick>, u64) {
        let before = ticks.len();
        let kept: Vec<Tick> = ticks.into_iter().filter(|t| self.contains(t)).collect();
        let dropped = (before - kept.len()) as u64;
        if dropped > 0 {
            debug!(dropped, "dropped ticks outside the trading session");
        }
        (kept, dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickforge_core::parse_timestamp_ms;

    fn make_tick(timestamp: &str) -> Tick {
        Tick {
            ts_ms: parse_timestamp_ms(timestamp).unwrap(),
            price: 450.0,
            size: 1,
        }
    }

    #[test]
    fn test_session_boundaries_are_inclusive() {
        let filter = SessionFilter::new(SessionConfig::default());
        assert!(filter.contains(&make_tick("2024-09-19 09:30:00.000")));
        assert!(filter.contains(&make_tick("2024-09-19 16:00:00.000")));
        assert!(!filter.contains(&make_tick("2024-09-19 09:29:59.999")));
        assert!(!filter.contains(&make_tick("2024-09-19 16:00:00.001")));
    }

    #[test]
    fn test_apply_drops_out_of_session_ticks() {
        let filter = SessionFilter::new(SessionConfig::default());
        let ticks = vec![
            make_tick("2024-09-19 08:00:00.000"),
            make_tick("2024-09-19 10:15:00.000"),
            make_tick("2024-09-19 20:47:02.535"),
        ];
        let (kept, dropped) = filter.apply(ticks);

        assert_eq!(kept.len(), 1);
        assert_eq!(dropped, 2);
    }
}
