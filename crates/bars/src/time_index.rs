//! Immutable, timestamp-sorted tick index with binary-search range queries.

use tracing::debug;

use tickforge_core::{Error, Result, Tick, TimestampMs};

/// The cleaned dataset, sorted ascending by timestamp.
///
/// Built once after cleaning and never mutated; any number of range queries
/// may borrow it concurrently. Timestamps are unique by the time an index is
/// built, so the sort is a total order with no tie-break.
pub struct TimeIndex {
    ticks: Vec<Tick>,
}

impl TimeIndex {
    /// Build an index from the deduplicated tick set.
    ///
    /// Fails with `EmptyDataset` when no ticks survived cleaning.
    pub fn build(mut ticks: Vec<Tick>) -> Result<Self> {
        if ticks.is_empty() {
            return Err(Error::EmptyDataset);
        }
        ticks.sort_unstable_by_key(|t| t.ts_ms);
        debug!(ticks = ticks.len(), "built time index");
        Ok(Self { ticks })
    }

    /// Number of indexed ticks (always at least one).
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Whether the index is empty. `build` rejects empty input, so this is
    /// only here to satisfy the usual `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Earliest indexed timestamp.
    pub fn first_ts(&self) -> TimestampMs {
        self.ticks[0].ts_ms
    }

    /// Latest indexed timestamp.
    pub fn last_ts(&self) -> TimestampMs {
        self.ticks[self.ticks.len() - 1].ts_ms
    }

    /// All indexed ticks in timestamp order.
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Select the ticks with `start <= ts <= end`.
    ///
    /// Lower-bound search for `start`, upper-bound search for `end`. A
    /// window with `start > end` or starting past the last indexed
    /// timestamp is `OutOfRange`; a degenerate window that overlaps the
    /// index but contains no ticks yields an empty slice without error.
    pub fn range(&self, start: TimestampMs, end: TimestampMs) -> Result<&[Tick]> {
        if start > end || start > self.last_ts() {
            return Err(Error::OutOfRange {
                start_ms: start,
                end_ms: end,
            });
        }

        let lo = self.ticks.partition_point(|t| t.ts_ms < start);
        let hi = self.ticks.partition_point(|t| t.ts_ms <= end);
        Ok(&self.ticks[lo..hi])
    }
}
