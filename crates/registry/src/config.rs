//! Configuration management for the model registry
//!
//! Settings come from defaults, an optional TOML file and environment
//! variables, in that order of precedence (environment wins).

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_XAI_BASE_URL: &str = "https://api.x.ai/v1";
pub const DEFAULT_OUTPUT_PATH: &str = "conf/openrouter_models.json";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("IO error reading config file: {message}")]
    IoError { message: String },

    #[error("Configuration parsing error: {message}")]
    ParseError { message: String },
}

/// Main registry configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Aggregator catalog sync settings
    pub catalog: CatalogConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Direct provider endpoints
    pub providers: ProvidersConfig,
}

/// Aggregator catalog sync settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the OpenRouter API
    pub api_base_url: String,
    /// OpenRouter API key (never written back out)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Where the merged model config is written
    pub output_path: PathBuf,
    /// Preserve curated aliases and scores from the existing config
    pub keep_aliases: bool,
    /// Add OpenRouter frontier models even when the API does not list them
    pub include_frontier: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
}

/// Direct provider endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub xai_base_url: String,
    #[serde(skip_serializing)]
    pub xai_api_key: Option<String>,
    pub openrouter_base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
            api_key: None,
            timeout_seconds: 30,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            keep_aliases: false,
            include_frontier: false,
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            xai_base_url: DEFAULT_XAI_BASE_URL.to_string(),
            xai_api_key: None,
            openrouter_base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: e.to_string(),
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;

        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(api_key) = env::var("OPENROUTER_API_KEY") {
            let trimmed = api_key.trim();
            if !trimmed.is_empty() {
                self.catalog.api_key = Some(trimmed.to_string());
            }
        }

        if let Ok(base_url) = env::var("OPENROUTER_BASE_URL") {
            self.catalog.api_base_url = base_url.clone();
            self.providers.openrouter_base_url = base_url;
        }

        if let Ok(output) = env::var("MODELREG_OUTPUT") {
            self.catalog.output_path = PathBuf::from(output);
        }

        if let Ok(timeout) = env::var("MODELREG_TIMEOUT_SECS") {
            self.catalog.timeout_seconds =
                timeout.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "MODELREG_TIMEOUT_SECS".to_string(),
                    reason: "Invalid number of seconds".to_string(),
                })?;
        }

        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.logging.level = log_level;
        }

        if let Ok(api_key) = env::var("XAI_API_KEY") {
            if !api_key.trim().is_empty() {
                self.providers.xai_api_key = Some(api_key.trim().to_string());
            }
        }

        if let Ok(base_url) = env::var("XAI_BASE_URL") {
            self.providers.xai_base_url = base_url;
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "catalog.timeout_seconds".to_string(),
                reason: "Timeout must be > 0".to_string(),
            });
        }

        if self.catalog.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "catalog.api_base_url".to_string(),
                reason: "Base URL cannot be empty".to_string(),
            });
        }

        if self.catalog.output_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "catalog.output_path".to_string(),
                reason: "Output path cannot be empty".to_string(),
            });
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                reason: format!("Must be one of: {}", valid_levels.join(", ")),
            });
        }

        Ok(())
    }

    /// Get the xAI API key
    pub fn get_xai_api_key(&self) -> Result<String, ConfigError> {
        match &self.providers.xai_api_key {
            Some(key) => Ok(key.clone()),
            None => Err(ConfigError::MissingRequired {
                key: "XAI_API_KEY".to_string(),
            }),
        }
    }
}
