//! Configuration for the vixio-ce cue engine
//!
//! Settings sources, highest priority first:
//! 1. Command-line arguments
//! 2. Environment variables (VIXIO_CE_PORT, VIXIO_CE_BIND, VIXIO_VALIDATION_URL)
//! 3. TOML configuration file
//! 4. Built-in defaults
//!
//! Items 1 and 2 are both handled by clap in `main.rs` and arrive here as
//! [`ConfigOverrides`].

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use vixio_common::config::{default_config_path, load_toml_or_default, LoggingConfig};

use crate::error::{Error, Result};

/// Default TOML file name under the platform config dir
pub const CONFIG_FILE_NAME: &str = "cue-engine.toml";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// Interface to bind the HTTP server to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Validation service (optional)
    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            validation: ValidationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Validation service connection settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Base URL; validation is skipped when unset
    #[serde(default)]
    pub url: Option<String>,

    /// Per-request timeout
    #[serde(default = "default_validation_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_ms: default_validation_timeout_ms(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_validation_timeout_ms() -> u64 {
    2000
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file at this path; built-in defaults used
    Defaults(PathBuf),
}

/// Command-line / environment overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub validation_url: Option<String>,
}

/// Effective configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub validation_url: Option<String>,
    pub validation_timeout: Duration,
    pub log_level: String,
    pub source: ConfigSource,
}

impl Config {
    /// Load the TOML file (if present) and apply overrides
    ///
    /// Runs before the tracing subscriber exists; callers log `source`
    /// once logging is up.
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        let path = overrides
            .config_path
            .clone()
            .unwrap_or_else(|| default_config_path(CONFIG_FILE_NAME));

        let source = if path.exists() {
            ConfigSource::File(path.clone())
        } else {
            ConfigSource::Defaults(path.clone())
        };

        let toml_config: TomlConfig = load_toml_or_default(&path)?;
        Ok(Self::from_parts(toml_config, overrides, source))
    }

    /// Merge a parsed TOML config with overrides
    pub fn from_parts(toml: TomlConfig, overrides: ConfigOverrides, source: ConfigSource) -> Self {
        let validation_url = overrides
            .validation_url
            .or(toml.validation.url)
            .filter(|url| !url.trim().is_empty());

        Self {
            bind_address: overrides.bind_address.unwrap_or(toml.bind_address),
            port: overrides.port.unwrap_or(toml.port),
            validation_url,
            validation_timeout: Duration::from_millis(toml.validation.timeout_ms),
            log_level: toml.logging.level,
            source,
        }
    }

    /// Socket address to bind the HTTP server to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|e| {
                Error::Config(format!(
                    "Invalid bind address {}:{}: {}",
                    self.bind_address, self.port, e
                ))
            })
    }
}
