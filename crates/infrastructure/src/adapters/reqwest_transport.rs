//! Transport implementation using reqwest.
//!
//! Sends prepared requests and hands back every status with its decoded
//! body; classification happens in the application pipeline.

use async_trait::async_trait;
use janitor_application::ports::{PreparedRequest, Transport, TransportError};
use janitor_domain::{HttpMethod, RawResponse};
use reqwest::{Client, Method};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("janitor/", env!("CARGO_PKG_VERSION"));

/// Transport over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// Redirects are followed up to 10 hops; the per-request timeout comes
    /// from the prepared request.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a transport with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to transport errors.
    ///
    /// Builder errors mean the request never left; everything else went out
    /// without a usable response.
    fn map_error(error: &reqwest::Error) -> TransportError {
        if error.is_builder() {
            return TransportError::Setup(error.to_string());
        }
        if error.is_timeout() {
            return TransportError::NoResponse(format!("timeout: {error}"));
        }
        TransportError::NoResponse(error.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url.clone())
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| Self::map_error(&e))?;
        let status = response.status().as_u16();
        tracing::debug!(method = %request.method, url = %request.url, status, "response received");

        let bytes = response.bytes().await.map_err(|e| Self::map_error(&e))?;
        Ok(RawResponse::from_bytes(status, &bytes))
    }
}
