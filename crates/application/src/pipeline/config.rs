//! Client configuration.

use std::time::Duration;

use url::Url;

/// Header carrying the credential.
pub const AUTH_HEADER: &str = "X-API-Key";

/// Overall request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Settings applied to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every path is resolved against.
    pub base_url: Url,
    /// Overall request timeout.
    pub timeout: Duration,
    /// Headers sent with every request.
    pub default_headers: Vec<(String, String)>,
}

impl ClientConfig {
    /// Creates a configuration with the default timeout and a JSON
    /// `Content-Type` header.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            default_headers: vec![(
                "Content-Type".to_string(),
                mime::APPLICATION_JSON.to_string(),
            )],
        }
    }

    /// Overrides the timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
