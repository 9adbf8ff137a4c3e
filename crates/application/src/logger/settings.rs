//! Logger configuration.

use janitor_domain::{BuildMode, LogLevel};
use serde::{Deserialize, Serialize};

/// Default capacity of the persisted snapshot.
pub const DEFAULT_MAX_STORED_LOGS: usize = 100;

/// Construction-time logger settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Least severe level that is recorded.
    pub level: LogLevel,
    /// Mirror entries to the console sink.
    pub enable_console: bool,
    /// Persist the snapshot and deliver ERROR entries to the collector.
    pub enable_storage: bool,
    /// Capacity of the persisted snapshot.
    pub max_stored_logs: usize,
    /// Collector endpoint for ERROR delivery.
    pub collector_endpoint: Option<String>,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self::for_mode(BuildMode::default(), None)
    }
}

impl LoggerSettings {
    /// Resolves settings for a build mode.
    ///
    /// A recognised `level_override` wins; anything else falls back to the
    /// mode's default threshold.
    #[must_use]
    pub fn for_mode(mode: BuildMode, level_override: Option<&str>) -> Self {
        let level = level_override
            .and_then(|raw| raw.parse::<LogLevel>().ok())
            .unwrap_or_else(|| mode.default_log_level());
        Self {
            level,
            enable_console: true,
            enable_storage: mode.is_production(),
            max_stored_logs: DEFAULT_MAX_STORED_LOGS,
            collector_endpoint: None,
        }
    }

    /// Sets the collector endpoint.
    #[must_use]
    pub fn with_collector_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.collector_endpoint = Some(endpoint.into());
        self
    }
}

/// Runtime-adjustable subset of the settings.
///
/// Each option is independent; absent options leave the current value
/// untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggerOptions {
    /// New threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
    /// Console mirroring toggle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_console: Option<bool>,
    /// Persistence toggle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_storage: Option<bool>,
    /// New snapshot capacity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stored_logs: Option<usize>,
}

impl LoggerOptions {
    /// Sets the threshold.
    #[must_use]
    pub const fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Toggles console mirroring.
    #[must_use]
    pub const fn enable_console(mut self, enabled: bool) -> Self {
        self.enable_console = Some(enabled);
        self
    }

    /// Toggles persistence.
    #[must_use]
    pub const fn enable_storage(mut self, enabled: bool) -> Self {
        self.enable_storage = Some(enabled);
        self
    }

    /// Sets the snapshot capacity.
    #[must_use]
    pub const fn max_stored_logs(mut self, max: usize) -> Self {
        self.max_stored_logs = Some(max);
        self
    }
}
