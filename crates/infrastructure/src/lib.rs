//! Janitor Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod export;
pub mod persistence;

pub use adapters::{HttpLogCollector, ManualClock, ReqwestTransport, SystemClock, TracingConsole};
pub use export::{ExportError, write_export};
pub use persistence::{FileKeyValueStore, STORE_FILE_NAME, default_data_dir};
