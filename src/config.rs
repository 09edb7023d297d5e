//! Service configuration

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen address
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Seed the sample poem as id 1 at start-up
    #[serde(default = "default_true")]
    pub seed_sample: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Namespace under which poem resources are minted
    #[serde(default = "default_base_uri")]
    pub base_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject metrics outside [0, 1] and cycle steps outside [1, totalCycles]
    #[serde(default = "default_true")]
    pub enforce_ranges: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

// Defaults
fn default_listen() -> SocketAddr { SocketAddr::from(([0, 0, 0, 0], 5000)) }
fn default_true() -> bool { true }
fn default_base_uri() -> String { "https://poetry.platform".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { seed_sample: true }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { base_uri: default_base_uri() }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { enforce_ranges: true }
    }
}

impl Config {
    /// Load from a TOML file, falling back to defaults when it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.export.base_uri.trim();
        if base.is_empty() {
            return Err(ConfigError::Invalid("export.base_uri must not be empty".to_string()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "export.base_uri must be an http(s) URI, got {}",
                base
            )));
        }
        if base.contains(char::is_whitespace) {
            return Err(ConfigError::Invalid("export.base_uri must not contain whitespace".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.listen.port(), 5000);
        assert!(config.store.seed_sample);
        assert!(config.validation.enforce_ranges);
        assert_eq!(config.export.base_uri, "https://poetry.platform");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str("[validation]\nenforce_ranges = false\n").unwrap();
        assert!(!config.validation.enforce_ranges);
        assert!(config.store.seed_sample);
    }

    #[test]
    fn test_rejects_bad_base_uri() {
        let mut config = Config::default();
        config.export.base_uri = "poetry platform".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        config.export.base_uri = String::new();
        assert!(config.validate().is_err());
    }
}
