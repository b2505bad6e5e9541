use crate::error::ConfigError;
use core_types::TrendPeriod;
use serde::Deserialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty configuration is valid.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageSettings,
    pub analytics: AnalyticsSettings,
    pub logging: LoggingSettings,
}

impl Config {
    /// Rejects values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.data_dir must not be empty".to_string(),
            ));
        }
        if self.analytics.top_n == 0 {
            return Err(ConfigError::ValidationError(
                "analytics.top_n must be at least 1".to_string(),
            ));
        }
        EnvFilter::try_new(&self.logging.level).map_err(|e| {
            ConfigError::ValidationError(format!(
                "logging.level '{}' is not a valid filter: {e}",
                self.logging.level
            ))
        })?;
        Ok(())
    }
}

/// Where the working copy of the collections lives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding `customers.json`, `products.json` and `orders.json`.
    pub data_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Defaults for the report commands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Length of top-N rankings when the command line does not say.
    pub top_n: usize,
    pub trend_period: TrendPeriod,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            top_n: 5,
            trend_period: TrendPeriod::Week,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive, e.g. `info` or `store=debug,warn`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
