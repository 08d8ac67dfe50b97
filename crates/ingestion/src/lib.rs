//! Source-file ingestion for the tickforge pipeline.
//!
//! This crate handles:
//! - Concurrent multi-file CSV loading (bounded worker pool)
//! - Per-row structural validation (raw rows into ticks)

pub mod loader;
pub mod validator;

pub use loader::TickLoader;
pub use validator::{RowValidator, ValidationStats};
