//! Transport port

use std::time::Duration;

use async_trait::async_trait;
use janitor_domain::{HttpMethod, RawResponse};
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// A fully prepared request: absolute URL, final headers, body and timeout.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL including the query string.
    pub url: Url,
    /// Path as issued by the caller, used for diagnostics.
    pub path: String,
    /// Headers in insertion order.
    pub headers: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<Value>,
    /// Overall request timeout.
    pub timeout: Duration,
}

impl PreparedRequest {
    /// Looks up a header by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw transport failures, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request went out but no response came back (connection failure,
    /// reset, or timeout).
    #[error("no response received: {0}")]
    NoResponse(String),

    /// The request could not be built or sent at all.
    #[error("{0}")]
    Setup(String),
}

/// Capability to send a request and receive a raw status and body.
///
/// Every status, including 4xx and 5xx, is returned as `Ok`; deciding what
/// counts as a failure belongs to the pipeline.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` when no response was obtained.
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError>;
}
