//! Console mirroring port

use janitor_domain::LogEntry;

/// Sink mirroring log entries to a console.
///
/// Implementations route each entry to the channel matching
/// `entry.level`. Writes must not block and must not log back into the
/// `Logger`.
pub trait ConsoleSink: Send + Sync {
    /// Writes one entry.
    fn write(&self, entry: &LogEntry);
}
