//! Configuration management
//!
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder substituted with the tenant subdomain in `zendesk.api_base`
pub const SUBDOMAIN_PLACEHOLDER: &str = "{subdomain}";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Help Center API configuration
    #[serde(default)]
    pub zendesk: ZendeskConfig,
    /// Static export configuration
    #[serde(default)]
    pub freeze: FreezeConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Help Center API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZendeskConfig {
    /// API base URL template; `{subdomain}` is replaced per request
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for ZendeskConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

fn default_api_base() -> String {
    "https://{subdomain}.zendesk.com/api/v2/help_center".to_string()
}

/// Static site export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreezeConfig {
    /// Output directory for frozen pages
    #[serde(default = "default_destination")]
    pub destination: PathBuf,
}

impl Default for FreezeConfig {
    fn default() -> Self {
        Self {
            destination: default_destination(),
        }
    }
}

fn default_destination() -> PathBuf {
    PathBuf::from("frozen")
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        // Handle empty file - return defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            }
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - FOLIO_SERVER_HOST
    /// - FOLIO_SERVER_PORT
    /// - FOLIO_ZENDESK_API_BASE
    /// - FOLIO_FREEZE_DESTINATION
    pub fn load_with_env(path: &std::path::Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check values that cannot be expressed by the YAML schema alone
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.zendesk.api_base.contains(SUBDOMAIN_PLACEHOLDER) {
            return Err(ConfigError::ValidationError(format!(
                "zendesk.api_base must contain the {} placeholder",
                SUBDOMAIN_PLACEHOLDER
            )));
        }
        Ok(())
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("FOLIO_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("FOLIO_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(api_base) = std::env::var("FOLIO_ZENDESK_API_BASE") {
            self.zendesk.api_base = api_base;
        }
        if let Ok(destination) = std::env::var("FOLIO_FREEZE_DESTINATION") {
            self.freeze.destination = PathBuf::from(destination);
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
