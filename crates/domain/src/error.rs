//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during parsing or validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The log level name is not one of ERROR, WARN, INFO, DEBUG.
    #[error("unknown log level: {0}")]
    UnknownLogLevel(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A list filter is not of the form `field:value`.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// The build mode name is not recognised.
    #[error("unknown build mode: {0}")]
    UnknownBuildMode(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
