//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the client core and the outside
//! world. Each port is a trait implemented by adapters in the
//! infrastructure layer, and by fakes in tests.

mod clock;
mod console;
mod key_value_store;
mod log_collector;
mod transport;

pub use clock::Clock;
pub use console::ConsoleSink;
pub use key_value_store::{KeyValueStore, StorageError};
pub use log_collector::{CollectorError, LogCollector};
pub use transport::{PreparedRequest, Transport, TransportError};
