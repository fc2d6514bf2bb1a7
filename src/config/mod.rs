//! Runtime configuration
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/stockroom/config.toml)
//! 3. Built-in defaults (lowest priority)

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::abilities::DEFAULT_BASE_URL;
use crate::debounce::DEFAULT_WINDOW;
use crate::inventory::Locale;

#[cfg(test)]
mod tests;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// `key` names where the value came from: the environment variable, or
    /// the key in the config file.
    #[error("invalid value for {key}: {message}")]
    Value { key: &'static str, message: String },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the ability API
    pub api_base_url: String,

    /// Quiet period before a search term is applied
    pub search_debounce: Duration,

    /// Number formatting for prices
    pub locale: Locale,

    /// Default tracing filter when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            search_debounce: DEFAULT_WINDOW,
            locale: Locale::default(),
            log_filter: "info".to_string(),
        }
    }
}

/// Config file structure; every key is optional.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub api_base_url: Option<String>,
    pub search_debounce_ms: Option<u64>,
    pub locale: Option<String>,
    pub log_filter: Option<String>,
}

impl Config {
    /// Get the config file path: ~/.config/stockroom/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("stockroom").join("config.toml"))
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn load() -> Result<Self, ConfigError> {
        let file = match Self::config_path() {
            Some(path) => Self::read_file(&path)?,
            None => FileConfig::default(),
        };
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Load with an explicit file instead of the default location.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let file = Self::read_file(path)?;
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// A missing file is not an error; an unreadable or malformed one is.
    pub(crate) fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub(crate) fn from_sources(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        // API URL: env > file > default
        let api_base_url = env("STOCKROOM_API_URL")
            .or(file.api_base_url)
            .unwrap_or(defaults.api_base_url);

        // Debounce window: env > file > default
        let search_debounce = match env("STOCKROOM_DEBOUNCE_MS") {
            Some(raw) => {
                let ms = raw.trim().parse::<u64>().map_err(|e| ConfigError::Value {
                    key: "STOCKROOM_DEBOUNCE_MS",
                    message: e.to_string(),
                })?;
                Duration::from_millis(ms)
            }
            None => file
                .search_debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.search_debounce),
        };

        // Locale: env > file > default
        let locale = match env("STOCKROOM_LOCALE")
            .map(|tag| ("STOCKROOM_LOCALE", tag))
            .or(file.locale.map(|tag| ("locale", tag)))
        {
            Some((key, tag)) => tag
                .parse::<Locale>()
                .map_err(|message| ConfigError::Value { key, message })?,
            None => defaults.locale,
        };

        // Log filter: env > file > default
        let log_filter = env("STOCKROOM_LOG")
            .or(file.log_filter)
            .unwrap_or(defaults.log_filter);

        Ok(Self {
            api_base_url,
            search_debounce,
            locale,
            log_filter,
        })
    }
}
