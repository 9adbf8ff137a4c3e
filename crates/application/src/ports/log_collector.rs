//! Remote log collector port

use async_trait::async_trait;
use janitor_domain::LogEntry;
use thiserror::Error;

/// Errors raised while delivering an entry to a collector.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// The collector could not be reached.
    #[error("collector unreachable: {0}")]
    Unreachable(String),

    /// The collector answered with a non-success status.
    #[error("collector rejected entry with status {0}")]
    Rejected(u16),
}

/// Best-effort sink for critical entries.
///
/// Delivery runs detached from the logging call; failures are observed and
/// discarded by the `Logger`.
#[async_trait]
pub trait LogCollector: Send + Sync {
    /// Delivers one entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry was not accepted.
    async fn deliver(&self, entry: &LogEntry) -> Result<(), CollectorError>;
}
