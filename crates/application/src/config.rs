//! Start-up configuration resolved from environment variables.

use std::path::PathBuf;

use janitor_domain::BuildMode;
use thiserror::Error;
use url::Url;

use crate::logger::LoggerSettings;
use crate::pipeline::ClientConfig;

/// API base URL override.
pub const ENV_API_URL: &str = "JANITOR_API_URL";
/// Log threshold override.
pub const ENV_LOG_LEVEL: &str = "JANITOR_LOG_LEVEL";
/// Collector endpoint for ERROR entries.
pub const ENV_LOG_ENDPOINT: &str = "JANITOR_LOG_ENDPOINT";
/// Build mode, `development` or `production`.
pub const ENV_MODE: &str = "JANITOR_MODE";
/// Directory of the durable store.
pub const ENV_DATA_DIR: &str = "JANITOR_DATA_DIR";

/// Base URL used when no override is given.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL does not parse.
    #[error("invalid {variable} '{value}': {source}")]
    InvalidUrl {
        /// Variable holding the value.
        variable: &'static str,
        /// Rejected value.
        value: String,
        /// Parser error.
        source: url::ParseError,
    },
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// API base URL.
    pub api_url: Url,
    /// Build mode.
    pub mode: BuildMode,
    /// Raw log level override, applied only if recognised.
    pub log_level: Option<String>,
    /// Collector endpoint.
    pub log_endpoint: Option<String>,
    /// Durable store directory, when overridden.
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Resolves the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the configuration from an arbitrary lookup. Blank values
    /// count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let raw_url = get(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url).map_err(|source| ConfigError::InvalidUrl {
            variable: ENV_API_URL,
            value: raw_url.clone(),
            source,
        })?;

        let mode = get(ENV_MODE)
            .and_then(|raw| raw.parse::<BuildMode>().ok())
            .unwrap_or_default();

        Ok(Self {
            api_url,
            mode,
            log_level: get(ENV_LOG_LEVEL),
            log_endpoint: get(ENV_LOG_ENDPOINT),
            data_dir: get(ENV_DATA_DIR).map(PathBuf::from),
        })
    }

    /// Logger settings for this configuration.
    #[must_use]
    pub fn logger_settings(&self) -> LoggerSettings {
        let settings = LoggerSettings::for_mode(self.mode, self.log_level.as_deref());
        match &self.log_endpoint {
            Some(endpoint) => settings.with_collector_endpoint(endpoint.clone()),
            None => settings,
        }
    }

    /// Client settings for this configuration.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone())
    }
}
