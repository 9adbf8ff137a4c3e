//! Filtering and summarizing a log snapshot for diagnostic views.

use serde::{Deserialize, Serialize};

use super::{LogEntry, LogLevel};

/// Filter applied to a log snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogQuery {
    /// Only keep entries with exactly this level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
    /// Case-insensitive substring matched against the message and the
    /// JSON-rendered context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl LogQuery {
    /// A query matching every entry.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            level: None,
            search: None,
        }
    }

    /// Restricts the query to one level.
    #[must_use]
    pub const fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Adds a search term. Blank terms match everything.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search)
        };
        self
    }

    /// Returns true if `entry` satisfies the query.
    #[must_use]
    pub fn matches(&self, entry: &LogEntry) -> bool {
        if self.level.is_some_and(|level| level != entry.level) {
            return false;
        }
        let Some(search) = &self.search else {
            return true;
        };
        let needle = search.to_lowercase();
        if entry.message.to_lowercase().contains(&needle) {
            return true;
        }
        serde_json::to_string(&entry.context)
            .is_ok_and(|context| context.to_lowercase().contains(&needle))
    }

    /// Applies the query and returns matching entries, most recent first.
    #[must_use]
    pub fn apply(&self, entries: &[LogEntry]) -> Vec<LogEntry> {
        entries
            .iter()
            .rev()
            .filter(|entry| self.matches(entry))
            .cloned()
            .collect()
    }
}

/// Per-level counts over a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogStats {
    /// Total number of entries.
    pub total: usize,
    /// ERROR entries.
    pub error: usize,
    /// WARN entries.
    pub warn: usize,
    /// INFO entries.
    pub info: usize,
    /// DEBUG entries.
    pub debug: usize,
}

impl LogStats {
    /// Counts entries per level.
    #[must_use]
    pub fn from_entries(entries: &[LogEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut stats, entry| {
            stats.total += 1;
            match entry.level {
                LogLevel::Error => stats.error += 1,
                LogLevel::Warn => stats.warn += 1,
                LogLevel::Info => stats.info += 1,
                LogLevel::Debug => stats.debug += 1,
            }
            stats
        })
    }

    /// Returns the count for one level.
    #[must_use]
    pub const fn count(&self, level: LogLevel) -> usize {
        match level {
            LogLevel::Error => self.error,
            LogLevel::Warn => self.warn,
            LogLevel::Info => self.info,
            LogLevel::Debug => self.debug,
        }
    }
}
