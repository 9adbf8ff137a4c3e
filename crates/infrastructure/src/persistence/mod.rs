//! Durable storage adapters.

mod file_store;

pub use file_store::{FileKeyValueStore, STORE_FILE_NAME, default_data_dir};
