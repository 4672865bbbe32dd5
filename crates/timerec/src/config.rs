//! Configuration management for timerec.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "timerec";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `TIMEREC_`, `__` between
///    section and key, e.g. `TIMEREC_WATCHDOG__TIMEOUT_SECS`)
/// 2. TOML config file at `~/.config/timerec/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record store configuration.
    pub store: StoreConfig,
    /// Watchdog configuration.
    pub watchdog: WatchdogConfig,
}

/// Record store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of timers held at once.
    pub capacity: usize,
}

/// Watchdog configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchdogConfig {
    /// Arm the watchdog when a session starts.
    pub enabled: bool,
    /// Seconds allowed between kicks.
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { capacity: 10 }
    }
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load and validate configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config = Self::extract_from(config_path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration without validating it.
    ///
    /// Callers that layer further overrides on top (such as command-line
    /// flags) validate once those are applied.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn extract_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("TIMEREC_").split("__"));

        Ok(figment.extract()?)
    }

    /// Render the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.store.capacity == 0 {
            return Err(Error::config_validation(
                "store.capacity must be greater than 0",
            ));
        }

        if self.watchdog.timeout_secs == 0 {
            return Err(Error::config_validation(
                "watchdog.timeout_secs must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Get the store capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if the capacity is zero.
    pub fn capacity(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.store.capacity)
            .ok_or_else(|| Error::config_validation("store.capacity must be greater than 0"))
    }

    /// Get the watchdog timeout as a Duration.
    #[must_use]
    pub fn watchdog_timeout(&self) -> Duration {
        Duration::from_secs(self.watchdog.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.capacity, 10);
        assert!(config.watchdog.enabled);
        assert_eq!(config.watchdog.timeout_secs, 10);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_capacity() {
        let mut config = Config::default();
        config.store.capacity = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("store.capacity"));
        assert!(config.capacity().is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.watchdog.timeout_secs = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("timeout_secs"));
    }

    #[test]
    fn test_capacity_accessor() {
        let config = Config::default();
        assert_eq!(config.capacity().unwrap().get(), 10);
    }

    #[test]
    fn test_watchdog_timeout() {
        let mut config = Config::default();
        config.watchdog.timeout_secs = 3;
        assert_eq!(config.watchdog_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("timerec"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!("timerec-test-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[store]\ncapacity = 3\n\n[watchdog]\nenabled = false\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.clone()));
        let _ = std::fs::remove_file(&path);

        let config = config.unwrap();
        assert_eq!(config.store.capacity, 3);
        assert!(!config.watchdog.enabled);
        assert_eq!(config.watchdog.timeout_secs, 5);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path =
            std::env::temp_dir().join(format!("timerec-test-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[store]\ncapacity = 0\n").unwrap();

        let result = Config::load_from(Some(path.clone()));
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_extract_defers_validation() {
        let path =
            std::env::temp_dir().join(format!("timerec-test-zero-{}.toml", std::process::id()));
        std::fs::write(&path, "[store]\ncapacity = 0\n").unwrap();

        let result = Config::extract_from(Some(path.clone()));
        let _ = std::fs::remove_file(&path);

        let mut config = result.unwrap();
        assert_eq!(config.store.capacity, 0);
        assert!(config.validate().is_err());

        config.store.capacity = 3;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_to_json_pretty() {
        let json = Config::default().to_json_pretty().unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"capacity\": 10"));

        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("capacity"));
        assert!(json.contains("timeout_secs"));
    }

    #[test]
    fn test_store_config_deserialize_partial() {
        let json = r#"{"capacity": 25}"#;
        let store: StoreConfig = serde_json::from_str(json).unwrap();
        assert_eq!(store.capacity, 25);
    }
}
