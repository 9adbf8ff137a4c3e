//! Immutable log records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::LogLevel;

/// Arbitrary structured key-value context attached to a log entry.
///
/// Keys are kept sorted so rendered context is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogContext(BTreeMap<String, Value>);

impl LogContext {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds a key-value pair and returns the context.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a key-value pair, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builds a context from any value serializing to a JSON object.
    ///
    /// Non-object values are stored under the `value` key; values that fail
    /// to serialize produce an empty context.
    #[must_use]
    pub fn from_serializable<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(Value::Object(map)) => Self(map.into_iter().collect()),
            Ok(Value::Null) | Err(_) => Self::new(),
            Ok(other) => Self::new().with("value", other),
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if the context holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<BTreeMap<String, Value>> for LogContext {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

/// Where an entry was produced: the client identity and current location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Origin {
    /// Client user agent string.
    pub user_agent: String,
    /// Location (view or URL) the application was at.
    pub url: String,
}

impl Origin {
    /// Creates an origin.
    #[must_use]
    pub fn new(user_agent: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            url: url.into(),
        }
    }
}

/// A single structured log record.
///
/// Serialized as
/// `{timestamp, level, message, context, userAgent, url}`, which is also the
/// persisted and exported format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Creation instant.
    pub timestamp: DateTime<Utc>,
    /// Severity.
    pub level: LogLevel,
    /// Free text message.
    pub message: String,
    /// Structured context, possibly empty.
    #[serde(default)]
    pub context: LogContext,
    /// Origin metadata.
    #[serde(flatten)]
    pub origin: Origin,
}

impl LogEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(
        timestamp: DateTime<Utc>,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
        origin: Origin,
    ) -> Self {
        Self {
            timestamp,
            level,
            message: message.into(),
            context,
            origin,
        }
    }

    /// Returns the `[timestamp] [LEVEL]` prefix used by console sinks.
    #[must_use]
    pub fn prefix(&self) -> String {
        format!(
            "[{}] [{}]",
            self.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            self.level
        )
    }
}
