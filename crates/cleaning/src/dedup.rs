//! Duplicate-timestamp elimination.

use std::collections::HashMap;

use tickforge_core::{Tick, TimestampMs};

/// Counts reported by duplicate elimination.
#[derive(Debug, Clone, Copy, Default)]
pub struct DedupStats {
    /// Ticks dropped because their timestamp was shared.
    pub dropped_ticks: u64,
    /// Distinct timestamps that occurred more than once.
    pub duplicated_timestamps: u64,
}

/// Drop every tick whose timestamp occurs more than once in the input.
///
/// When two ticks share a timestamp there is no principled way to pick the
/// valid one, so all of them are discarded rather than arbitrarily keeping
/// one. Every timestamp in the output is unique.
pub fn drop_shared_timestamps(ticks: Vec<Tick>) -> (Vec<Tick>, DedupStats) {
    let mut counts: HashMap<TimestampMs, u32> = HashMap::with_capacity(ticks.len());
    for tick in &ticks {
        *counts.entry(tick.ts_ms).or_insert(0) += 1;
    }

    let duplicated_timestamps = counts.values().filter(|&&c| c > 1).count() as u64;
    let before = ticks.len();
    let kept: Vec<Tick> = ticks
        .into_iter()
        .filter(|t| counts[&t.ts_ms] == 1)
        .collect();

    let stats = DedupStats {
        dropped_ticks: (before - kept.len()) as u64,
        duplicated_timestamps,
    };
    (kept, stats)
}
