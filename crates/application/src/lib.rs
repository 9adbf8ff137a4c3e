//! Janitor Application - Client pipeline, logger and ports
//!
//! This crate defines the application layer with:
//! - Port traits (transport, durable storage, clock, console, log collector)
//! - The credential store, the diagnostic logger and the HTTP pipeline
//! - Session tracking and the login flow built on top of them

pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logger;
pub mod pipeline;
pub mod ports;
pub mod session;
pub mod storage;

#[cfg(test)]
mod testing;

pub use auth::{AuthError, Authenticator};
pub use config::{AppConfig, ConfigError};
pub use credentials::{CREDENTIAL_KEY, CredentialStore};
pub use error::{ApplicationError, ApplicationResult};
pub use logger::{LOG_STORAGE_KEY, LogExport, Logger, LoggerBuilder, LoggerOptions, LoggerSettings};
pub use pipeline::{
    AUTH_HEADER, ApiClient, ClientConfig, DEFAULT_TIMEOUT, PrepareError, Verdict, classify,
    prepare_request,
};
pub use ports::{
    Clock, CollectorError, ConsoleSink, KeyValueStore, LogCollector, PreparedRequest,
    StorageError, Transport, TransportError,
};
pub use session::SessionMonitor;
pub use storage::MemoryStore;
