//! Core types and configuration for the tickforge pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - Tick and bar data types
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
