//! Bootstrap configuration loading
//!
//! Every Vixio service reads a small TOML file at startup. Resolution order:
//! 1. Command-line argument / environment variable (handled by the service's clap args)
//! 2. TOML config file
//! 3. Compiled defaults
//!
//! A missing config file is NOT fatal: a warning is logged and defaults are used.
//! A config file that exists but cannot be parsed IS fatal.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Logging configuration shared by all services
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level or full env-filter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Default config file location for a service
///
/// `~/.config/vixio/<file_name>` on Linux, the platform config dir elsewhere,
/// `/etc/vixio/<file_name>` when the platform has no per-user config dir.
pub fn default_config_path(file_name: &str) -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("vixio").join(file_name))
        .unwrap_or_else(|| PathBuf::from("/etc/vixio").join(file_name))
}

/// Load a TOML config file, falling back to `T::default()` if it does not exist
pub fn load_toml_or_default<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        warn!(
            "Config file {} not found, using built-in defaults",
            path.display()
        );
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        #[serde(default)]
        port: u16,
        #[serde(default)]
        logging: LoggingConfig,
    }

    #[test]
    fn test_default_log_level() {
        assert_eq!(LoggingConfig::default().level, "info");
    }

    #[test]
    fn test_default_config_path_ends_with_file_name() {
        let path = default_config_path("cue-engine.toml");
        assert!(path.ends_with("vixio/cue-engine.toml"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = PathBuf::from("/nonexistent/vixio/does-not-exist.toml");
        let config: Sample = load_toml_or_default(&path).unwrap();
        assert_eq!(config, Sample::default());
    }
}
