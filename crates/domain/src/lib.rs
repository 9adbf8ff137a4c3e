//! Janitor Domain - Core client types
//!
//! This crate defines the domain model shared by the HTTP pipeline, the
//! diagnostic logger and the pagination helpers.
//! All types here are pure Rust with no I/O dependencies.

pub mod credential;
pub mod error;
pub mod log;
pub mod mode;
pub mod outcome;
pub mod pagination;
pub mod request;
pub mod response;
pub mod state;

pub use credential::Credential;
pub use error::{DomainError, DomainResult};
pub use log::{LogContext, LogEntry, LogLevel, LogQuery, LogStats, Origin};
pub use mode::BuildMode;
pub use outcome::{ApiError, ApiErrorKind, ApiOutcome};
pub use pagination::{PAGE_SIZES, PageItem, PageRange, WindowOptions, compute_window};
pub use request::{ApiRequest, HttpMethod, ListFilter, ListQuery};
pub use response::{PageResponse, RawResponse, StatusCode};
pub use state::SessionState;
