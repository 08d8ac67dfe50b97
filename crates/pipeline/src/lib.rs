//! Stage composition for the tickforge pipeline.
//!
//! Threads an explicit immutable dataset value through the cleaning stages
//! (validate, bounds filter, optional session filter, dedup, index) and runs
//! aggregation queries against the built index. No state survives between
//! invocations.

pub mod export;

use tracing::info;

use tickforge_bars::{Bucketer, IntervalSpec, TimeIndex, Window};
use tickforge_cleaning::{drop_shared_timestamps, DedupStats, OutlierFilter, SessionFilter};
use tickforge_core::config::SessionConfig;
use tickforge_core::{Config, Error, OhlcvBar, PriceBounds, RawRow, Result};
use tickforge_ingestion::{RowValidator, ValidationStats};

/// Per-stage counts and derived bounds for one pipeline invocation.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Row validation counts.
    pub validation: ValidationStats,
    /// Price bounds derived from the structurally-valid ticks.
    pub bounds: PriceBounds,
    /// Ticks dropped by the bounds filter.
    pub outliers_dropped: u64,
    /// Ticks dropped by the session filter (zero when disabled).
    pub out_of_session_dropped: u64,
    /// Duplicate-timestamp elimination counts.
    pub dedup: DedupStats,
    /// Ticks that made it into the index.
    pub surviving_ticks: usize,
}

/// Run the cleaning stages over raw rows and build the queryable dataset.
///
/// Bounds are derived once from every structurally-valid tick — before the
/// session filter and duplicate removal — then applied to all of them.
/// Fails with `EmptyDataset` when no ticks survive.
pub fn build_dataset(rows: Vec<RawRow>, config: &Config) -> Result<(TimeIndex, PipelineReport)> {
    let mut validator = RowValidator::new();
    let ticks = validator.validate_batch(rows);

    let filter = OutlierFilter::from_ticks(&ticks, config.cleaning.iqr_multiplier)?;
    let bounds = filter.bounds();
    let (ticks, outliers_dropped) = filter.apply(ticks);

    let (ticks, out_of_session_dropped) = if config.cleaning.restrict_to_session {
        SessionFilter::new(config.session.clone()).apply(ticks)
    } else {
        (ticks, 0)
    };

    let (ticks, dedup) = drop_shared_timestamps(ticks);

    let report = PipelineReport {
        validation: validator.stats().clone(),
        bounds,
        outliers_dropped,
        out_of_session_dropped,
        dedup,
        surviving_ticks: ticks.len(),
    };

    let index = TimeIndex::build(ticks)?;

    info!(
        rows = report.validation.total_rows,
        malformed = report.validation.rejected(),
        outliers = report.outliers_dropped,
        out_of_session = report.out_of_session_dropped,
        duplicates = report.dedup.dropped_ticks,
        surviving = report.surviving_ticks,
        "dataset built"
    );

    Ok((index, report))
}

/// One aggregation request over a built dataset.
#[derive(Debug, Clone)]
pub struct BarRequest {
    /// Selected window.
    pub window: Window,
    /// Bar width.
    pub interval: IntervalSpec,
}

/// Validate a window request and aggregate the selected ticks into bars.
///
/// A window that lies entirely past the indexed data is `OutOfRange`
/// (non-fatal — the caller decides whether to retry with another window);
/// other boundary violations are `InvalidWindow`.
pub fn query_bars(
    index: &TimeIndex,
    request: &BarRequest,
    session: &SessionConfig,
) -> Result<Vec<OhlcvBar>> {
    if request.window.start_ms > index.last_ts() {
        return Err(Error::OutOfRange {
            start_ms: request.window.start_ms,
            end_ms: request.window.end_ms,
        });
    }
    request.window.validate(index.last_ts(), session)?;

    let selected = index.range(request.window.start_ms, request.window.end_ms)?;
    Ok(Bucketer::new(&request.interval).bucket(selected, &request.window))
}
