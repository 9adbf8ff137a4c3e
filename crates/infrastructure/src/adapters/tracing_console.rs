//! Console sink writing through `tracing`.

use janitor_application::ports::ConsoleSink;
use janitor_domain::{LogEntry, LogLevel};

/// Target used for mirrored entries, so subscribers can filter them.
pub const CONSOLE_TARGET: &str = "janitor::log";

/// Mirrors logger entries to the `tracing` macro matching their level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConsole;

impl TracingConsole {
    /// Creates the sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the context, or nothing when it is empty.
    fn render_context(entry: &LogEntry) -> String {
        if entry.context.is_empty() {
            return String::new();
        }
        serde_json::to_string(&entry.context).unwrap_or_default()
    }
}

impl ConsoleSink for TracingConsole {
    fn write(&self, entry: &LogEntry) {
        let prefix = entry.prefix();
        let context = Self::render_context(entry);
        let message = entry.message.as_str();
        match entry.level {
            LogLevel::Error => {
                tracing::error!(target: CONSOLE_TARGET, %prefix, %context, "{message}");
            }
            LogLevel::Warn => {
                tracing::warn!(target: CONSOLE_TARGET, %prefix, %context, "{message}");
            }
            LogLevel::Info => {
                tracing::info!(target: CONSOLE_TARGET, %prefix, %context, "{message}");
            }
            LogLevel::Debug => {
                tracing::debug!(target: CONSOLE_TARGET, %prefix, %context, "{message}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use janitor_domain::{LogContext, Origin};

    fn entry(context: LogContext) -> LogEntry {
        LogEntry::new(Utc::now(), LogLevel::Warn, "Resource not found", context, Origin::default())
    }

    #[test]
    fn test_empty_context_renders_nothing() {
        assert_eq!(TracingConsole::render_context(&entry(LogContext::new())), "");
    }

    #[test]
    fn test_context_renders_as_json() {
        let rendered = TracingConsole::render_context(&entry(LogContext::new().with("url", "/task/3")));
        assert_eq!(rendered, r#"{"url":"/task/3"}"#);
    }

    #[test]
    fn test_write_without_subscriber_is_silent() {
        for level in LogLevel::all() {
            let mut e = entry(LogContext::new());
            e.level = *level;
            TracingConsole::new().write(&e);
        }
    }
}
