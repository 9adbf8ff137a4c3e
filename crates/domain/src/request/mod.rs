//! Outgoing API request types.

mod method;
mod query;
mod spec;

pub use method::HttpMethod;
pub use query::{ListFilter, ListQuery};
pub use spec::ApiRequest;
