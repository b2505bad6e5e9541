//! # Orderdesk Configuration
//!
//! Typed application settings and the logging setup that depends on them.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. built-in defaults,
//! 2. `orderdesk.toml` in the working directory, or the file given explicitly,
//! 3. `ORDERDESK_*` environment variables, with `__` between nested keys
//!    (`ORDERDESK_ANALYTICS__TOP_N=10`).

use config::Environment;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use logging::init_logging;
pub use settings::{AnalyticsSettings, Config, LoggingSettings, StorageSettings};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "orderdesk.toml";

/// Loads and validates the application configuration.
///
/// With `path`, that file must exist. Without it, `orderdesk.toml` is used
/// when present and silently skipped otherwise.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_with_env(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix("ORDERDESK")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
    };
    let builder = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;
    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::TrendPeriod;
    use std::path::PathBuf;
    use testresult::TestResult;

    fn no_env() -> Environment {
        environment().source(Some(config::Map::new()))
    }

    fn env(pairs: &[(&str, &str)]) -> Environment {
        let mut vars = config::Map::new();
        for (key, value) in pairs {
            vars.insert(key.to_string(), value.to_string());
        }
        environment().source(Some(vars))
    }

    fn write_config(dir: &Path, body: &str) -> TestResult<PathBuf> {
        let path = dir.join("orderdesk.toml");
        std::fs::write(&path, body)?;
        Ok(path)
    }

    #[test]
    fn empty_file_yields_defaults() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = write_config(dir.path(), "")?;

        let config = load_with_env(Some(&path), no_env())?;

        assert_eq!(config, Config::default());
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
        assert_eq!(config.analytics.top_n, 5);
        assert_eq!(config.analytics.trend_period, TrendPeriod::Week);
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = write_config(
            dir.path(),
            r#"
            [storage]
            data_dir = "/var/lib/orderdesk"

            [analytics]
            trend_period = "month"

            [logging]
            level = "debug"
            directory = "logs"
            "#,
        )?;

        let config = load_with_env(Some(&path), no_env())?;

        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/orderdesk"));
        assert_eq!(config.analytics.trend_period, TrendPeriod::Month);
        assert_eq!(config.analytics.top_n, 5);
        assert_eq!(config.logging.directory, Some(PathBuf::from("logs")));
        Ok(())
    }

    #[test]
    fn environment_overrides_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = write_config(dir.path(), "[analytics]\ntop_n = 3\n")?;

        let config = load_with_env(
            Some(&path),
            env(&[
                ("ORDERDESK_ANALYTICS__TOP_N", "12"),
                ("ORDERDESK_LOGGING__LEVEL", "warn"),
            ]),
        )?;

        assert_eq!(config.analytics.top_n, 12);
        assert_eq!(config.logging.level, "warn");
        Ok(())
    }

    #[test]
    fn zero_top_n_is_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = write_config(dir.path(), "[analytics]\ntop_n = 0\n")?;

        let err = load_with_env(Some(&path), no_env()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("top_n")));
        Ok(())
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_with_env(Some(Path::new("/nonexistent/orderdesk.toml")), no_env());
        assert!(matches!(err, Err(ConfigError::LoadError(_))));
    }
}
