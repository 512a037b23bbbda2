use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Environment variable that overrides `api.base_url`.
pub const BASE_URL_ENV: &str = "FLEETDESK_BASE_URL";

/// Upper bound for `defaults.page_size`.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/fleetdesk/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("fleetdesk").join("config.toml")
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, starts from `Config::default()`.
    /// - `FLEETDESK_BASE_URL` overrides the file's base URL.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Self::parse(&content, path)?
        } else {
            Config::default()
        };

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            config.override_base_url(&url);
        }

        config.validate()?;
        Ok(config)
    }

    /// Replaces `api.base_url` unless `url` is blank.
    ///
    /// Shared by the environment override and the `--base-url` flag.
    pub fn override_base_url(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.api.base_url = url.to_string();
        }
    }

    /// Parses TOML content; `path` is only used for error reporting.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The base URL is an absolute http(s) URL
    /// - The page size is between 1 and `MAX_PAGE_SIZE`
    /// - Timeouts are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                message: format!("api.base_url '{}' must start with http:// or https://", url),
            });
        }
        if reqwest::Url::parse(url).is_err() {
            return Err(ConfigError::ValidationError {
                message: format!("api.base_url '{}' is not a valid URL", url),
            });
        }

        if self.defaults.page_size == 0 || self.defaults.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "defaults.page_size must be between 1 and {}, got {}",
                    MAX_PAGE_SIZE, self.defaults.page_size
                ),
            });
        }

        if self.api.timeout_seconds == 0 || self.api.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "api timeouts must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
