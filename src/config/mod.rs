//! Configuration loading and validation.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origin, or "*" for any
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Upgrade calculator tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Hours removed from an upgrade per builder potion
    #[serde(default = "default_potion_hours")]
    pub potion_hours: u64,

    /// Longest accepted upgrade, in hours
    #[serde(default = "default_max_upgrade_hours")]
    pub max_upgrade_hours: u64,
}

fn default_potion_hours() -> u64 {
    9
}

fn default_max_upgrade_hours() -> u64 {
    720
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            potion_hours: default_potion_hours(),
            max_upgrade_hours: default_max_upgrade_hours(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub calculator: CalculatorConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            server: ServerConfig::default(),
            calculator: CalculatorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Like `from_file`, but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.server.cors_origin != "*"
            && HeaderValue::from_str(&self.server.cors_origin).is_err()
        {
            return Err(ConfigError::ValidationError(format!(
                "CORS origin is not a valid header value: {:?}",
                self.server.cors_origin
            )));
        }

        if self.calculator.potion_hours == 0 {
            return Err(ConfigError::ValidationError(
                "Potion hours must be greater than 0".to_string(),
            ));
        }

        if self.calculator.max_upgrade_hours == 0 {
            return Err(ConfigError::ValidationError(
                "Max upgrade hours must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.calculator.potion_hours, 9);
        assert_eq!(config.calculator.max_upgrade_hours, 720);
    }

    #[test]
    fn test_config_validation_ok() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_potion_hours() {
        let mut config = AppConfig::default();
        config.calculator.potion_hours = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_cors_origin() {
        let mut config = AppConfig::default();
        config.server.cors_origin = "http://bad\norigin".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9090\n\n[calculator]\npotion_hours = 6").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.calculator.potion_hours, 6);
        assert_eq!(config.calculator.max_upgrade_hours, 720);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[calculator]\nmax_upgrade_hours = 0").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.calculator.potion_hours, parsed.calculator.potion_hours);
        assert_eq!(config.server.port, parsed.server.port);
    }
}
