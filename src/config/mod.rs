//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! (and optionally a TOML/JSON file) using the `config` and `dotenvy` crates.
//! Configuration is loaded with the `AHP_SHERPA` prefix and nested values use
//! double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use ahp_sherpa::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Perturbation step: {}", config.analysis.sensitivity_step);
//! ```

mod analysis;
mod error;
mod logging;

pub use analysis::AnalysisConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "AHP_SHERPA";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Analysis thresholds, tolerances and methods
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AHP_SHERPA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `AHP_SHERPA__ANALYSIS__SENSITIVITY_STEP=0.2` -> `analysis.sensitivity_step = 0.2`
    /// - `AHP_SHERPA__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(None)
    }

    /// Load configuration from a file, overridden by environment variables
    ///
    /// The file format is taken from its extension (`.toml`, `.json`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or unparseable, or if
    /// any value cannot be parsed into its expected type.
    pub fn load_with_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::build(Some(path.as_ref()))
    }

    fn build(file: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.analysis.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::{PriorityMethod, RandomIndexPolicy};
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("AHP_SHERPA__ANALYSIS__SENSITIVITY_STEP");
        env::remove_var("AHP_SHERPA__ANALYSIS__PRIORITY_METHOD");
        env::remove_var("AHP_SHERPA__ANALYSIS__RANDOM_INDEX_POLICY");
        env::remove_var("AHP_SHERPA__ANALYSIS__CHECK_VALUE_RANGE");
        env::remove_var("AHP_SHERPA__LOGGING__JSON");
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.analysis, AnalysisConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_overrides_analysis_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("AHP_SHERPA__ANALYSIS__SENSITIVITY_STEP", "0.2");
        env::set_var("AHP_SHERPA__ANALYSIS__PRIORITY_METHOD", "power_iteration");
        env::set_var("AHP_SHERPA__ANALYSIS__RANDOM_INDEX_POLICY", "extrapolate");
        env::set_var("AHP_SHERPA__ANALYSIS__CHECK_VALUE_RANGE", "false");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.analysis.sensitivity_step, 0.2);
        assert_eq!(config.analysis.priority_method, PriorityMethod::PowerIteration);
        assert_eq!(config.analysis.random_index_policy, RandomIndexPolicy::Extrapolate);
        assert!(!config.analysis.check_value_range);
    }

    #[test]
    fn test_environment_overrides_logging_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("AHP_SHERPA__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().logging.json);
    }

    #[test]
    fn test_load_with_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = toml_file(
            "[analysis]\nconsistency_threshold = 0.08\nsensitivity_step = 0.05\n\n[logging]\nlog_level = \"warn\"\n",
        );

        let config = AppConfig::load_with_file(file.path()).unwrap();
        assert_eq!(config.analysis.consistency_threshold, 0.08);
        assert_eq!(config.analysis.sensitivity_step, 0.05);
        assert_eq!(config.analysis.reciprocal_tolerance, 0.001);
        assert_eq!(config.logging.log_level, "warn");
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let file = toml_file("[analysis]\nsensitivity_step = 0.05\n");
        env::set_var("AHP_SHERPA__ANALYSIS__SENSITIVITY_STEP", "0.3");
        let result = AppConfig::load_with_file(file.path());
        clear_env();

        assert_eq!(result.unwrap().analysis.sensitivity_step, 0.3);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let result = AppConfig::load_with_file("/nonexistent/ahp-sherpa.toml");
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validate_rejects_bad_step() {
        let config = AppConfig {
            analysis: AnalysisConfig {
                sensitivity_step: 0.0,
                ..AnalysisConfig::default()
            },
            ..AppConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidSensitivityStep(0.0))
        );
    }
}
