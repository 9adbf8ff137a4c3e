//! Bounded, leveled diagnostic logger.
//!
//! Entries are kept in memory for the whole session, mirrored to a console
//! sink, and (when storage is enabled) persisted as a snapshot truncated to
//! the most recent `max_stored_logs` entries.

mod export;
mod recorder;
mod settings;

pub use export::LogExport;
pub use recorder::{LOG_STORAGE_KEY, Logger, LoggerBuilder};
pub use settings::{LoggerOptions, LoggerSettings};
