//! Statistical cleaning for the tickforge pipeline.
//!
//! This crate handles:
//! - Quartile/IQR price bound computation
//! - Outlier rejection against dataset-wide bounds
//! - Optional trading-session filtering
//! - Duplicate-timestamp elimination

pub mod dedup;
pub mod outlier;
pub mod quartiles;
pub mod session;

pub use dedup::{drop_shared_timestamps, DedupStats};
pub use outlier::OutlierFilter;
pub use quartiles::{percentile, price_bounds};
pub use session::SessionFilter;
