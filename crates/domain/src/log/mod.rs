//! Structured diagnostic log types.

mod entry;
mod level;
mod query;

pub use entry::{LogContext, LogEntry, Origin};
pub use level::LogLevel;
pub use query::{LogQuery, LogStats};
