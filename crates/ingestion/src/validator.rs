//! Per-row structural validation.
//!
//! Turns raw string rows into ticks, dropping rows with missing fields,
//! unparseable values, or non-positive prices/sizes. Drops are silent and
//! aggregated as counts; a single bad row never aborts ingestion.

use tickforge_core::{parse_timestamp_ms, RawRow, Tick};

/// Counts of accepted and rejected rows, by rejection reason.
#[derive(Debug, Clone, Default)]
pub struct ValidationStats {
    /// Total rows seen.
    pub total_rows: u64,
    /// Rows that passed all structural checks.
    pub accepted: u64,
    /// Rows with at least one empty field.
    pub missing_fields: u64,
    /// Rows whose timestamp did not parse.
    pub bad_timestamp: u64,
    /// Rows whose price did not parse as a finite number.
    pub bad_price: u64,
    /// Rows whose price parsed but was not strictly positive.
    pub nonpositive_price: u64,
    /// Rows whose size did not parse as a positive integer.
    pub bad_size: u64,
}

impl ValidationStats {
    /// Total rejected rows.
    pub fn rejected(&self) -> u64 {
        self.total_rows - self.accepted
    }

    /// Reset statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Validates raw rows into ticks, tracking drop reasons.
///
/// Decimal-point corruption (a price shifted by a decimal place) is
/// structurally valid and passes through here; the outlier filter catches it
/// downstream against the dataset-wide price bounds.
pub struct RowValidator {
    stats: ValidationStats,
}

impl RowValidator {
    /// Create a new row validator.
    pub fn new() -> Self {
        Self {
            stats: ValidationStats::default(),
        }
    }

    /// Validate a single raw row.
    ///
    /// Returns the parsed tick, or `None` if the row was dropped (the drop
    /// reason is recorded in the stats).
    pub fn validate(&mut self, row: &RawRow) -> Option<Tick> {
        self.stats.total_rows += 1;

        if row.timestamp.is_empty() || row.price.is_empty() || row.size.is_empty() {
            self.stats.missing_fields += 1;
            return None;
        }

        let Some(ts_ms) = parse_timestamp_ms(&row.timestamp) else {
            self.stats.bad_timestamp += 1;
            return None;
        };

        let price: f64 = match row.price.parse() {
            Ok(p) => p,
            Err(_) => {
                self.stats.bad_price += 1;
                return None;
            }
        };
        if !price.is_finite() {
            self.stats.bad_price += 1;
            return None;
        }
        if price <= 0.0 {
            self.stats.nonpositive_price += 1;
            return None;
        }

        let size: u64 = match row.size.parse() {
            Ok(s) if s > 0 => s,
            _ => {
                self.stats.bad_size += 1;
                return None;
            }
        };

        self.stats.accepted += 1;
        Some(Tick { ts_ms, price, size })
    }

    /// Validate a batch of raw rows, keeping the surviving ticks.
    pub fn validate_batch(&mut self, rows: Vec<RawRow>) -> Vec<Tick> {
        rows.iter().filter_map(|row| self.validate(row)).collect()
    }

    /// Get validation statistics.
    pub fn stats(&self) -> &ValidationStats {
        &self.stats
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}

impl Default for RowValidator {
    fn default() -> Self {
        Self::new()
    }
}
