//! Configuration for the logging subsystem and demo server.
//!
//! Loaded from an optional `daylog.toml` in the working directory, then
//! overridden by environment variables. The logging switches follow the
//! "enabled unless explicitly false" rule.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional config file in the working directory.
pub const CONFIG_FILE: &str = "daylog.toml";

/// Default base directory for day log files, relative to the process
/// working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host for the HTTP server
    #[serde(default = "default_host")]
    pub host: String,

    /// Port for the HTTP server
    #[serde(default = "default_port")]
    pub port: u16,

    /// Emit colorized lines to the terminal
    #[serde(default = "default_enabled")]
    pub enable_console_logging: bool,

    /// Append JSON lines to per-level day files
    #[serde(default = "default_enabled")]
    pub enable_file_logging: bool,

    /// Base directory for day log files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Age in whole days beyond which a day file is deleted
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_enabled() -> bool {
    true
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_DIR)
}

fn default_retention_days() -> i64 {
    crate::logging::RETENTION_DAYS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_console_logging: default_enabled(),
            enable_file_logging: default_enabled(),
            log_dir: default_log_dir(),
            retention_days: default_retention_days(),
        }
    }
}

impl Config {
    /// Load configuration from `daylog.toml` if present, falling back to
    /// defaults, then apply environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration from an explicit file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content =
                std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply the deployment-facing environment switches.
    fn apply_env_overrides(&mut self) {
        if let Some(enabled) = env_flag("ENABLE_CONSOLE_LOGGING") {
            self.enable_console_logging = enabled;
        }
        if let Some(enabled) = env_flag("ENABLE_FILE_LOGGING") {
            self.enable_file_logging = enabled;
        }
        if let Ok(host) = std::env::var("HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.port = port;
            }
        }
    }
}

/// Read a boolean switch from the environment.
///
/// Any value other than `false` (case-insensitive) counts as enabled; a
/// missing variable leaves the configured value in place.
fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|value| !value.trim().eq_ignore_ascii_case("false"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert!(config.enable_console_logging);
        assert!(config.enable_file_logging);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.retention_days, 90);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.port, parsed.port);
        assert_eq!(config.log_dir, parsed.log_dir);
    }

    #[test]
    fn test_missing_keys_stay_enabled() {
        let parsed: Config = toml::from_str("port = 8080\n").unwrap();
        assert_eq!(parsed.port, 8080);
        assert!(parsed.enable_console_logging);
        assert!(parsed.enable_file_logging);
    }

    #[test]
    fn test_explicit_false_disables() {
        let parsed: Config = toml::from_str("enable_file_logging = false\n").unwrap();
        assert!(!parsed.enable_file_logging);
        assert!(parsed.enable_console_logging);
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/daylog.toml")).unwrap();
        assert_eq!(config.port, default_port());
    }

    #[test]
    fn test_env_flag_semantics() {
        std::env::set_var("DAYLOG_TEST_FLAG_ON", "true");
        std::env::set_var("DAYLOG_TEST_FLAG_OFF", "False");
        std::env::set_var("DAYLOG_TEST_FLAG_ODD", "yes");

        assert_eq!(env_flag("DAYLOG_TEST_FLAG_ON"), Some(true));
        assert_eq!(env_flag("DAYLOG_TEST_FLAG_OFF"), Some(false));
        // enabled unless explicitly false
        assert_eq!(env_flag("DAYLOG_TEST_FLAG_ODD"), Some(true));
        assert_eq!(env_flag("DAYLOG_TEST_FLAG_UNSET"), None);
    }
}
