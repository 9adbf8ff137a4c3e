//! Log collector posting entries to an HTTP endpoint.

use async_trait::async_trait;
use janitor_application::ports::{CollectorError, LogCollector};
use janitor_domain::LogEntry;
use reqwest::Client;
use url::Url;

/// Delivers entries as JSON `POST` bodies.
#[derive(Debug, Clone)]
pub struct HttpLogCollector {
    client: Client,
    endpoint: Url,
}

impl HttpLogCollector {
    /// Creates a collector for `endpoint`.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Creates a collector sharing an existing client.
    #[must_use]
    pub const fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// Parses `endpoint` and creates a collector.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL.
    pub fn from_endpoint(endpoint: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(endpoint)?))
    }

    /// The endpoint entries are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl LogCollector for HttpLogCollector {
    async fn deliver(&self, entry: &LogEntry) -> Result<(), CollectorError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .json(entry)
            .send()
            .await
            .map_err(|e| CollectorError::Unreachable(e.to_string()))?;

        let status = response.status();
        tracing::trace!(endpoint = %self.endpoint, status = status.as_u16(), "log entry delivered");
        if status.is_success() {
            Ok(())
        } else {
            Err(CollectorError::Rejected(status.as_u16()))
        }
    }
}
