//! Configuration management for company-enricher
//!
//! Configuration is read from `./config/company-enricher.toml` (or the path
//! given with `--config`). When no file exists the embedded default template
//! is used, so the tool runs without any setup.

use serde::Deserialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file path relative to working directory
pub const CONFIG_PATH: &str = "./config/company-enricher.toml";

/// Default configuration file content
pub const DEFAULT_CONFIG: &str = include_str!("../config/company-enricher.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid URL in '{field}': {url}")]
    InvalidUrl { field: String, url: String },

    #[error("Configuration field '{field}' cannot be empty")]
    EmptyRequired { field: String },
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub lookup: LookupConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    pub output: OutputConfig,
}

/// Tax-lookup site and HTTP client settings
#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    pub base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Scrape non-2xx responses instead of treating them as a miss
    #[serde(default)]
    pub parse_error_pages: bool,
}

/// What happens to the batch when a page cannot be fetched
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchErrorPolicy {
    /// Stop the run; nothing is written
    #[default]
    Abort,
    /// Keep the record unchanged and move on
    Skip,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct BatchConfig {
    #[serde(default)]
    pub on_fetch_error: FetchErrorPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

impl AppConfig {
    /// Load from `path` if it exists, otherwise parse the embedded default
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from_path(path)
        } else {
            tracing::debug!("No configuration at {}, using built-in defaults", path.display());
            Self::from_toml(DEFAULT_CONFIG)
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url("lookup.base_url", &self.lookup.base_url)?;

        if self.lookup.user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "lookup.user_agent".to_string(),
            });
        }
        if self.lookup.request_timeout_secs == 0 {
            return Err(ConfigError::EmptyRequired {
                field: "lookup.request_timeout_secs".to_string(),
            });
        }
        if self.output.path.trim().is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "output.path".to_string(),
            });
        }

        Ok(())
    }

    /// Apply command-line overrides and re-validate
    pub fn with_overrides(
        mut self,
        base_url: Option<&str>,
        output: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if let Some(base_url) = base_url {
            self.lookup.base_url = base_url.to_string();
        }
        if let Some(output) = output {
            self.output.path = output.to_string();
        }
        self.validate()?;
        Ok(self)
    }

    /// Write the default configuration file to `path`
    pub fn create_default_config(path: &Path) -> Result<PathBuf, ConfigError> {
        let io_err = |source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut file = fs::File::create(path).map_err(io_err)?;
        file.write_all(DEFAULT_CONFIG.as_bytes()).map_err(io_err)?;

        Ok(path.to_path_buf())
    }
}

fn validate_base_url(field: &str, raw: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidUrl {
        field: field.to_string(),
        url: raw.to_string(),
    };

    let parsed = url::Url::parse(raw).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(invalid());
    }
    Ok(())
}
