//! Incoming response types.

mod page;
mod spec;

pub use page::PageResponse;
pub use spec::{RawResponse, StatusCode};
