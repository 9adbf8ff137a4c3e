//! Application error types

use thiserror::Error;

use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::ports::StorageError;

/// Application-level errors surfaced to the composition root.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Start-up configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A durable storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Login or session restore failed.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// An API call failed.
    #[error("API error: {0}")]
    Api(#[from] janitor_domain::ApiError),

    /// Serializing diagnostic output failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing diagnostic output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
