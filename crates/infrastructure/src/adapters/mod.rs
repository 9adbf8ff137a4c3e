//! Port adapters backed by external crates and the operating system.

mod http_log_collector;
mod reqwest_transport;
mod system_clock;
mod tracing_console;

pub use http_log_collector::HttpLogCollector;
pub use reqwest_transport::ReqwestTransport;
pub use system_clock::{ManualClock, SystemClock};
pub use tracing_console::TracingConsole;
