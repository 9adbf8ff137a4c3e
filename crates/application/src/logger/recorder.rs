//! The logger service.

use std::error::Error as StdError;
use std::sync::Arc;

use janitor_domain::{
    HttpMethod, LogContext, LogEntry, LogLevel, LogQuery, LogStats, Origin, StatusCode,
};
use parking_lot::Mutex;
use serde_json::Value;

use super::export::LogExport;
use super::settings::{LoggerOptions, LoggerSettings};
use crate::ports::{Clock, ConsoleSink, KeyValueStore, LogCollector, StorageError};
use crate::storage::MemoryStore;

/// Storage key of the persisted log snapshot.
pub const LOG_STORAGE_KEY: &str = "app_logs";

/// Mutable logger state guarded by a single lock.
#[derive(Debug)]
struct LoggerState {
    level: LogLevel,
    enable_console: bool,
    enable_storage: bool,
    max_stored_logs: usize,
    logs: Vec<LogEntry>,
    location: String,
}

struct LoggerInner {
    state: Mutex<LoggerState>,
    store: Arc<dyn KeyValueStore>,
    console: Option<Arc<dyn ConsoleSink>>,
    collector: Option<Arc<dyn LogCollector>>,
    clock: Arc<dyn Clock>,
    user_agent: String,
}

/// Recorder of structured diagnostic events.
///
/// One instance is built by the application root and handed to every
/// component that logs. Clones share the same buffer.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

/// Builder for [`Logger`].
pub struct LoggerBuilder {
    settings: LoggerSettings,
    clock: Arc<dyn Clock>,
    store: Option<Arc<dyn KeyValueStore>>,
    console: Option<Arc<dyn ConsoleSink>>,
    collector: Option<Arc<dyn LogCollector>>,
    user_agent: String,
    location: String,
}

impl LoggerBuilder {
    /// Durable store holding the snapshot. Defaults to an in-memory store.
    #[must_use]
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Console sink entries are mirrored to.
    #[must_use]
    pub fn console(mut self, console: Arc<dyn ConsoleSink>) -> Self {
        self.console = Some(console);
        self
    }

    /// Collector receiving ERROR entries.
    #[must_use]
    pub fn collector(mut self, collector: Arc<dyn LogCollector>) -> Self {
        self.collector = Some(collector);
        self
    }

    /// User agent stamped on every entry.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Initial location stamped on entries.
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Builds the logger, loading any previously persisted snapshot.
    #[must_use]
    pub fn build(self) -> Logger {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let logs = load_snapshot(store.as_ref());
        let state = LoggerState {
            level: self.settings.level,
            enable_console: self.settings.enable_console,
            enable_storage: self.settings.enable_storage,
            max_stored_logs: self.settings.max_stored_logs,
            logs,
            location: self.location,
        };
        Logger {
            inner: Arc::new(LoggerInner {
                state: Mutex::new(state),
                store,
                console: self.console,
                collector: self.collector,
                clock: self.clock,
                user_agent: self.user_agent,
            }),
        }
    }
}

/// Reads the persisted snapshot. Missing or unreadable snapshots start an
/// empty buffer.
fn load_snapshot(store: &dyn KeyValueStore) -> Vec<LogEntry> {
    match store.get(LOG_STORAGE_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|error| {
            tracing::debug!(%error, "discarding unreadable log snapshot");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(error) => {
            tracing::debug!(%error, "log snapshot could not be read");
            Vec::new()
        }
    }
}

impl Logger {
    /// Starts building a logger.
    #[must_use]
    pub fn builder(settings: LoggerSettings, clock: Arc<dyn Clock>) -> LoggerBuilder {
        LoggerBuilder {
            settings,
            clock,
            store: None,
            console: None,
            collector: None,
            user_agent: concat!("janitor/", env!("CARGO_PKG_VERSION")).to_string(),
            location: String::new(),
        }
    }

    /// Records an entry if `level` passes the current threshold.
    ///
    /// Never fails: persistence errors drop the buffer, delivery errors are
    /// discarded in the background.
    ///
    /// With storage enabled the snapshot is written synchronously while the
    /// state lock is held, so snapshots are written in buffer order. A slow
    /// store therefore delays concurrent callers.
    pub fn log(&self, level: LogLevel, message: impl Into<String>, context: LogContext) {
        let (entry, mirror, deliver) = {
            let mut state = self.inner.state.lock();
            if !level.passes(state.level) {
                return;
            }
            let origin = Origin::new(self.inner.user_agent.clone(), state.location.clone());
            let entry = LogEntry::new(self.inner.clock.now(), level, message, context, origin);
            state.logs.push(entry.clone());
            if state.enable_storage {
                self.persist(&mut state);
            }
            (
                entry,
                state.enable_console,
                state.enable_storage && level == LogLevel::Error,
            )
        };

        if mirror && let Some(console) = &self.inner.console {
            console.write(&entry);
        }
        if deliver {
            self.deliver(entry);
        }
    }

    /// Records an ERROR entry.
    pub fn error(&self, message: impl Into<String>, context: LogContext) {
        self.log(LogLevel::Error, message, context);
    }

    /// Records a WARN entry.
    pub fn warn(&self, message: impl Into<String>, context: LogContext) {
        self.log(LogLevel::Warn, message, context);
    }

    /// Records an INFO entry.
    pub fn info(&self, message: impl Into<String>, context: LogContext) {
        self.log(LogLevel::Info, message, context);
    }

    /// Records a DEBUG entry.
    pub fn debug(&self, message: impl Into<String>, context: LogContext) {
        self.log(LogLevel::Debug, message, context);
    }

    /// Records an outgoing request at DEBUG.
    pub fn log_request(&self, method: HttpMethod, url: &str, body: Option<&Value>) {
        self.debug(
            format!("HTTP Request: {method} {url}"),
            LogContext::new()
                .with("method", method.as_str())
                .with("url", url)
                .with("data", body.cloned().unwrap_or(Value::Null)),
        );
    }

    /// Records a response: ERROR for status 400 and above, DEBUG otherwise
    /// (including when no response arrived).
    pub fn log_response(
        &self,
        method: HttpMethod,
        url: &str,
        status: Option<StatusCode>,
        body: Option<&Value>,
    ) {
        let level = if status.is_some_and(StatusCode::is_error) {
            LogLevel::Error
        } else {
            LogLevel::Debug
        };
        let shown = status.map_or_else(|| "NO_RESPONSE".to_string(), |s| s.as_u16().to_string());
        self.log(
            level,
            format!("HTTP Response: {method} {url} - {shown}"),
            LogContext::new()
                .with("method", method.as_str())
                .with("url", url)
                .with("status", status.map(StatusCode::as_u16))
                .with("data", body.cloned().unwrap_or(Value::Null)),
        );
    }

    /// Records an error with its source chain at ERROR.
    pub fn log_error(&self, error: &(dyn StdError + 'static), context: LogContext) {
        let mut chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(Value::String(cause.to_string()));
            source = cause.source();
        }
        self.error(error.to_string(), context.with("error_chain", chain));
    }

    /// Returns a copy of the buffer in insertion order.
    #[must_use]
    pub fn get_logs(&self) -> Vec<LogEntry> {
        self.inner.state.lock().logs.clone()
    }

    /// Returns entries with exactly `level`, in insertion order.
    #[must_use]
    pub fn get_logs_by_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.inner
            .state
            .lock()
            .logs
            .iter()
            .filter(|entry| entry.level == level)
            .cloned()
            .collect()
    }

    /// Returns entries matching `query`, most recent first.
    #[must_use]
    pub fn query(&self, query: &LogQuery) -> Vec<LogEntry> {
        query.apply(&self.inner.state.lock().logs)
    }

    /// Counts buffered entries per level.
    #[must_use]
    pub fn stats(&self) -> LogStats {
        LogStats::from_entries(&self.inner.state.lock().logs)
    }

    /// Empties the buffer and the persisted snapshot, then records the clear.
    pub fn clear_logs(&self) {
        self.inner.state.lock().logs.clear();
        if let Err(error) = self.inner.store.remove(LOG_STORAGE_KEY) {
            tracing::debug!(%error, "failed to remove log snapshot");
        }
        self.info("Logs cleared", LogContext::new());
    }

    /// Serializes the whole buffer, untruncated, into an export artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_logs(&self) -> serde_json::Result<LogExport> {
        let logs = self.get_logs();
        let export = LogExport::from_entries(&logs, self.inner.clock.now())?;
        self.info("Logs exported", LogContext::new().with("count", logs.len()));
        Ok(export)
    }

    /// Applies `options` to subsequent calls and records the change.
    pub fn configure(&self, options: LoggerOptions) {
        {
            let mut state = self.inner.state.lock();
            if let Some(level) = options.level {
                state.level = level;
            }
            if let Some(enabled) = options.enable_console {
                state.enable_console = enabled;
            }
            if let Some(enabled) = options.enable_storage {
                state.enable_storage = enabled;
            }
            if let Some(max) = options.max_stored_logs {
                state.max_stored_logs = max;
            }
        }
        self.info("Logger configured", LogContext::from_serializable(&options));
    }

    /// Updates the location stamped on subsequent entries.
    pub fn set_location(&self, location: impl Into<String>) {
        self.inner.state.lock().location = location.into();
    }

    /// Current threshold.
    #[must_use]
    pub fn level(&self) -> LogLevel {
        self.inner.state.lock().level
    }

    /// Current settings, excluding the collector endpoint.
    #[must_use]
    pub fn settings(&self) -> LoggerSettings {
        let state = self.inner.state.lock();
        LoggerSettings {
            level: state.level,
            enable_console: state.enable_console,
            enable_storage: state.enable_storage,
            max_stored_logs: state.max_stored_logs,
            collector_endpoint: None,
        }
    }

    /// Writes the most recent `max_stored_logs` entries. On failure the
    /// whole buffer and the snapshot are dropped.
    ///
    /// Runs under the state lock.
    fn persist(&self, state: &mut LoggerState) {
        let skip = state.logs.len().saturating_sub(state.max_stored_logs);
        let result = serde_json::to_string(&state.logs[skip..])
            .map_err(|error| StorageError::Serialization(error.to_string()))
            .and_then(|json| self.inner.store.set(LOG_STORAGE_KEY, &json));

        if let Err(error) = result {
            tracing::debug!(%error, "log snapshot persistence failed, dropping buffer");
            state.logs.clear();
            if let Err(error) = self.inner.store.remove(LOG_STORAGE_KEY) {
                tracing::debug!(%error, "failed to remove log snapshot");
            }
        }
    }

    /// Spawns a detached delivery of `entry` to the collector.
    fn deliver(&self, entry: LogEntry) {
        let Some(collector) = self.inner.collector.clone() else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("no async runtime, skipping collector delivery");
            return;
        };
        runtime.spawn(async move {
            if let Err(error) = collector.deliver(&entry).await {
                tracing::debug!(%error, "collector delivery failed");
            }
        });
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Logger")
            .field("level", &state.level)
            .field("entries", &state.logs.len())
            .finish_non_exhaustive()
    }
}
