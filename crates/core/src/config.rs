//! Configuration structures for the tickforge pipeline.

use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main configuration for the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Loader configuration.
    pub loader: LoaderConfig,
    /// Cleaning configuration.
    pub cleaning: CleaningConfig,
    /// Trading session configuration.
    pub session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loader: LoaderConfig::default(),
            cleaning: CleaningConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// Source-file loading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Maximum number of files read concurrently.
    pub max_concurrent_files: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_concurrent_files: 8,
        }
    }
}

/// Cleaning-stage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// IQR multiplier for the outlier bounds (Q1 - k*IQR, Q3 + k*IQR).
    pub iqr_multiplier: f64,
    /// Drop ticks whose time-of-day falls outside the trading session.
    pub restrict_to_session: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: 1.5,
            restrict_to_session: false,
        }
    }
}

/// Trading session hours in the fixed reference timezone.
///
/// Window requests must fall inside this session; the same hours drive the
/// optional tick-level session filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session open (inclusive).
    pub open: NaiveTime,
    /// Session close (inclusive).
    pub close: NaiveTime,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            close: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
        }
    }
}

impl SessionConfig {
    /// Whether a time-of-day falls inside the session (inclusive at both ends).
    #[inline]
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.open && time <= self.close
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.cleaning.iqr_multiplier, 1.5);
        assert!(!config.cleaning.restrict_to_session);
        assert_eq!(config.loader.max_concurrent_files, 8);
        assert_eq!(config.session.open, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(config.session.close, NaiveTime::from_hms_opt(16, 0, 0).unwrap());
    }

    #[test]
    fn test_session_contains() {
        let session = SessionConfig::default();
        assert!(session.contains(NaiveTime::from_hms_opt(9, 30, 0).unwrap()));
        assert!(session.contains(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
        assert!(session.contains(NaiveTime::from_hms_opt(16, 0, 0).unwrap()));
        assert!(!session.contains(NaiveTime::from_hms_opt(9, 29, 59).unwrap()));
        assert!(!session.contains(NaiveTime::from_hms_opt(16, 0, 1).unwrap()));
    }

    #[test]
    fn test_partial_json_overrides() {
        let config: Config =
            serde_json::from_str(r#"{"cleaning": {"iqr_multiplier": 3.0}}"#).unwrap();
        assert_eq!(config.cleaning.iqr_multiplier, 3.0);
        // untouched sections keep their defaults
        assert!(!config.cleaning.restrict_to_session);
        assert_eq!(config.loader.max_concurrent_files, 8);
    }
}
