//! Fixed-interval bucketing of a sorted tick slice into OHLCV bars.

use tickforge_core::{OhlcvBar, Tick, TimestampMs};

use crate::interval::IntervalSpec;
use crate::window::Window;

/// A bar being accumulated for the current interval.
struct BucketInProgress {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl BucketInProgress {
    fn new(first: &Tick) -> Self {
        Self {
            open: first.price,
            high: first.price,
            low: first.price,
            close: first.price,
            volume: first.size,
        }
    }

    fn add(&mut self, tick: &Tick) {
        self.high = self.high.max(tick.price);
        self.low = self.low.min(tick.price);
        self.close = tick.price;
        self.volume += tick.size;
    }

    fn into_bar(self, start_ms: TimestampMs, end_ms: TimestampMs) -> OhlcvBar {
        OhlcvBar {
            start_ms,
            end_ms,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        }
    }
}

/// Partitions a selected tick slice into fixed-width OHLCV bars.
pub struct Bucketer {
    interval_ms: i64,
}

impl Bucketer {
    /// Create a bucketer for a parsed interval.
    pub fn new(interval: &IntervalSpec) -> Self {
        Self {
            interval_ms: interval.duration_ms(),
        }
    }

    /// Reduce the ticks inside a window into per-interval bars.
    ///
    /// Intervals are anchored at the window start: the first covers
    /// `[start, start + interval)`, the next `[start + interval, ...)`, and
    /// so on. Ticks must already be sorted ascending (a `TimeIndex` range
    /// selection). Intervals containing no ticks emit no bar. The loop
    /// terminates because each iteration advances the interval start by a
    /// fixed positive duration.
    pub fn bucket(&self, ticks: &[Tick], window: &Window) -> Vec<OhlcvBar> {
        let mut bars = Vec::new();
        let mut cursor = 0;
        let mut interval_start = window.start_ms;

        while interval_start < window.end_ms && cursor < ticks.len() {
            let interval_end = interval_start + self.interval_ms;

            let mut bucket: Option<BucketInProgress> = None;
            while cursor < ticks.len() && ticks[cursor].ts_ms < interval_end {
                let tick = &ticks[cursor];
                match bucket.as_mut() {
                    Some(b) => b.add(tick),
                    None => bucket = Some(BucketInProgress::new(tick)),
                }
                cursor += 1;
            }

            if let Some(bucket) = bucket {
                bars.push(bucket.into_bar(interval_start, interval_end));
            }

            interval_start = interval_end;
        }

        bars
    }
}
