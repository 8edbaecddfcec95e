//! Engine configuration
//!
//! Defaults applied by the executor when a caller leaves a parameter out.

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};
use crate::executor::DEFAULT_ZSCORE_THRESHOLD;
use crate::observability::Severity;

/// Executor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Z-score threshold for outlier detection (default: 3.0)
    #[serde(default = "default_zscore_threshold")]
    pub default_zscore_threshold: f64,

    /// Width of time-of-day windows in hours (default: 1)
    #[serde(default = "default_window_hours")]
    pub default_window_hours: u32,

    /// Field holding the record timestamp (default: "pickup_datetime")
    #[serde(default = "default_timestamp_field")]
    pub timestamp_field: String,

    /// Minimum severity written by loggers built from this config (default: INFO)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_zscore_threshold() -> f64 {
    DEFAULT_ZSCORE_THRESHOLD
}

fn default_window_hours() -> u32 {
    1
}

fn default_timestamp_field() -> String {
    "pickup_datetime".to_string()
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_zscore_threshold: default_zscore_threshold(),
            default_window_hours: default_window_hours(),
            timestamp_field: default_timestamp_field(),
            log_level: default_log_level(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON config document
    pub fn from_json_str(text: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_json::from_str(text)
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the executor cannot run with
    pub fn validate(&self) -> EngineResult<()> {
        if !self.default_zscore_threshold.is_finite() || self.default_zscore_threshold < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "default_zscore_threshold must be a non-negative number, got {}",
                self.default_zscore_threshold
            )));
        }
        if self.default_window_hours == 0 {
            return Err(EngineError::InvalidConfig(
                "default_window_hours must be at least 1".to_string(),
            ));
        }
        if self.timestamp_field.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "timestamp_field must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
