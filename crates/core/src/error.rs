//! Error types for the tickforge pipeline.

use thiserror::Error;

use crate::types::TimestampMs;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the tickforge pipeline.
///
/// Malformed rows are not errors: the cleaning stages drop them silently and
/// aggregate counts for observability. Only dataset-level failures abort.
#[derive(Error, Debug)]
pub enum Error {
    /// Requested window has no overlap with the indexed dataset (non-fatal).
    #[error("window {start_ms}..{end_ms} is outside the indexed range")]
    OutOfRange {
        start_ms: TimestampMs,
        end_ms: TimestampMs,
    },

    /// No valid ticks survived cleaning; aggregation cannot proceed (fatal).
    #[error("no ticks survived cleaning")]
    EmptyDataset,

    /// Interval specification rejected before any bucketing begins.
    #[error("invalid interval spec: {0}")]
    InvalidInterval(String),

    /// Time-window request violated a boundary constraint.
    #[error("invalid window: {0}")]
    InvalidWindow(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Data error (invalid or missing data).
    #[error("data error: {0}")]
    Data(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Error::Data(msg.into())
    }

    /// Create an invalid-interval error.
    pub fn invalid_interval(msg: impl Into<String>) -> Self {
        Error::InvalidInterval(msg.into())
    }

    /// Create an invalid-window error.
    pub fn invalid_window(msg: impl Into<String>) -> Self {
        Error::InvalidWindow(msg.into())
    }

    /// Whether the error is fatal to the whole pipeline invocation.
    ///
    /// `OutOfRange` is surfaced to the caller, who may retry with a
    /// different window; everything else aborts the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::OutOfRange { .. })
    }
}
