//! Runtime configuration
//!
//! Loaded from a JSON file, all keys optional:
//!
//! ```json
//! { "log_level": "warn", "log_rejections": true }
//! ```
//!
//! `ARGBIND_LOG_LEVEL` overrides `log_level` when set.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event, Logger, Severity};

/// Environment variable overriding `log_level`
pub const LOG_LEVEL_ENV: &str = "ARGBIND_LOG_LEVEL";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid log_level: '{0}'. Expected trace, info, warn, error or fatal.")]
    InvalidLogLevel(String),
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Minimum severity written by the logger (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether rejected values are logged (default true)
    #[serde(default = "default_log_rejections")]
    pub log_rejections: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_rejections() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_rejections: default_log_rejections(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with the environment override applied
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Apply `ARGBIND_LOG_LEVEL` if set
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            self.log_level = level;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.severity().map(|_| ())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> Result<Severity, ConfigError> {
        Severity::parse(&self.log_level)
            .ok_or_else(|| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Install this configuration process-wide.
    pub fn apply(&self) -> Result<(), ConfigError> {
        let severity = self.severity()?;
        Logger::set_min_severity(severity);
        set_log_rejections(self.log_rejections);
        log_event_with_fields(Event::ConfigLoaded, &[
            ("log_level", severity.as_str()),
            ("log_rejections", if self.log_rejections { "true" } else { "false" }),
        ]);
        Ok(())
    }
}

static LOG_REJECTIONS: AtomicBool = AtomicBool::new(true);

fn set_log_rejections(enabled: bool) {
    LOG_REJECTIONS.store(enabled, Ordering::Relaxed);
}

/// Whether rejected values are logged
pub(crate) fn log_rejections() -> bool {
    LOG_REJECTIONS.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::{capture, lock_global_state};
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert!(config.log_rejections);
        assert_eq!(config.severity().unwrap(), Severity::Info);
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("argbind.json");
        fs::write(&path, r#"{ "log_level": "warn" }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.severity().unwrap(), Severity::Warn);
        assert!(config.log_rejections);
    }

    #[test]
    fn test_load_rejects_unknown_level() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("argbind.json");
        fs::write(&path, r#"{ "log_level": "loud" }"#).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(ref l) if l == "loud"));
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("argbind.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");
        assert!(matches!(Config::load(&path), Err(ConfigError::Read(_))));
    }

    #[test]
    fn test_env_overrides_log_level() {
        let _guard = lock_global_state();
        let previous = std::env::var(LOG_LEVEL_ENV).ok();

        std::env::set_var(LOG_LEVEL_ENV, "ERROR");
        let config = Config::from_env().unwrap();
        assert_eq!(config.severity().unwrap(), Severity::Error);
        assert!(config.log_rejections);

        std::env::set_var(LOG_LEVEL_ENV, "loud");
        let err = Config::default().with_env_overrides().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(ref l) if l == "loud"));

        std::env::remove_var(LOG_LEVEL_ENV);
        assert_eq!(Config::from_env().unwrap(), Config::default());

        if let Some(level) = previous {
            std::env::set_var(LOG_LEVEL_ENV, level);
        }
    }

    #[test]
    fn test_apply_installs_settings() {
        let _guard = lock_global_state();
        let config = Config {
            log_level: "warn".to_string(),
            log_rejections: false,
        };

        let lines = capture(|| config.apply().unwrap());
        assert_eq!(Logger::min_severity(), Severity::Warn);
        assert!(!log_rejections());
        // CONFIG_LOADED is info and the new minimum is already warn
        assert!(lines.is_empty());

        let lines = capture(|| Config::default().apply().unwrap());
        assert_eq!(Logger::min_severity(), Severity::Info);
        assert!(log_rejections());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("CONFIG_LOADED"));
        assert!(lines[0].contains("\"log_rejections\":\"true\""));
    }

    #[test]
    fn test_apply_rejects_bad_level() {
        let _guard = lock_global_state();
        let config = Config {
            log_level: "loud".to_string(),
            log_rejections: false,
        };
        assert!(config.apply().is_err());
        assert_eq!(Logger::min_severity(), Severity::Info);
        assert!(log_rejections());
    }
}
