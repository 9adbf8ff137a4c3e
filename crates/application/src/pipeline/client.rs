//! The API client: prepare, send, classify, log.

use std::sync::Arc;

use janitor_domain::{
    ApiError, ApiErrorKind, ApiOutcome, ApiRequest, ListQuery, LogContext, PageResponse,
    RawResponse,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::classify::{Verdict, classify};
use super::config::ClientConfig;
use super::prepare::prepare_request;
use crate::credentials::CredentialStore;
use crate::logger::Logger;
use crate::ports::Transport;
use crate::session::SessionMonitor;

/// Client mediating every call to the backend.
///
/// Requests are independent; the only shared state is the credential
/// store, the logger buffer and the session monitor.
pub struct ApiClient<T> {
    transport: Arc<T>,
    credentials: CredentialStore,
    logger: Logger,
    session: SessionMonitor,
    config: ClientConfig,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            credentials: self.credentials.clone(),
            logger: self.logger.clone(),
            session: self.session.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T: Transport> ApiClient<T> {
    /// Creates a client.
    #[must_use]
    pub const fn new(
        transport: Arc<T>,
        credentials: CredentialStore,
        logger: Logger,
        session: SessionMonitor,
        config: ClientConfig,
    ) -> Self {
        Self {
            transport,
            credentials,
            logger,
            session,
            config,
        }
    }

    /// Sends a request and returns the raw response on 2xx.
    ///
    /// Every failure is logged before it is returned. A 401 or 403 clears
    /// the stored credential and invalidates the session.
    ///
    /// # Errors
    ///
    /// Returns the classified `ApiError` for any non-2xx status, missing
    /// response or failure to build the request.
    pub async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let credential = self.credentials.get();
        let prepared = match prepare_request(request, credential.as_ref(), &self.config) {
            Ok(prepared) => prepared,
            Err(error) => {
                self.logger.error(
                    "Request interceptor error",
                    LogContext::new().with("error", error.to_string()),
                );
                return Err(ApiError::new(ApiErrorKind::Unknown, error.to_string()));
            }
        };

        let method = prepared.method;
        let path = prepared.path.as_str();
        self.logger
            .log_request(method, path, prepared.body.as_ref());

        tracing::trace!(%method, url = %prepared.url, "sending request");
        let verdict = classify(self.transport.send(&prepared).await);
        self.logger
            .log_response(method, path, verdict.status(), verdict.body());
        self.report(&verdict, path);
        verdict.into_result()
    }

    /// Logs the failure class and applies the auth side effects.
    fn report(&self, verdict: &Verdict, url: &str) {
        match verdict {
            Verdict::Success(_) => {}
            Verdict::Unauthorized { status, .. } => {
                self.logger.warn(
                    "Unauthorized access - API key invalid",
                    LogContext::new()
                        .with("status", status.as_u16())
                        .with("url", url),
                );
                if let Err(error) = self.credentials.clear() {
                    self.logger.log_error(&error, LogContext::new());
                }
                self.session.invalidate();
            }
            Verdict::NotFound { .. } => {
                self.logger
                    .warn("Resource not found", LogContext::new().with("url", url));
            }
            Verdict::Server { body } => {
                self.logger.error(
                    "Server error",
                    LogContext::new().with("url", url).with("data", body.clone()),
                );
            }
            Verdict::UnexpectedStatus { status, body } => {
                self.logger.error(
                    "HTTP error",
                    LogContext::new()
                        .with("status", status.as_u16())
                        .with("url", url)
                        .with("data", body.clone()),
                );
            }
            Verdict::NoResponse { reason } => {
                tracing::debug!(%reason, url, "no response received");
                self.logger.error(
                    "Network error - no response received",
                    LogContext::new().with("url", url),
                );
            }
            Verdict::SetupFailed { message } => {
                self.logger.error(
                    "Request setup error",
                    LogContext::new().with("message", message.as_str()),
                );
            }
        }
    }

    /// Sends a request and decodes the body into the uniform envelope.
    pub async fn execute<D: DeserializeOwned>(&self, request: &ApiRequest) -> ApiOutcome<D> {
        let result = self.send(request).await.and_then(|response| {
            serde_json::from_value(response.body).map_err(|error| {
                self.logger.error(
                    "Response decoding failed",
                    LogContext::new()
                        .with("url", request.path.as_str())
                        .with("error", error.to_string()),
                );
                ApiError::new(ApiErrorKind::Unknown, format!("Invalid response body: {error}"))
            })
        });
        result.into()
    }

    /// `GET path`.
    pub async fn get<D: DeserializeOwned>(&self, path: &str) -> ApiOutcome<D> {
        self.execute(&ApiRequest::get(path)).await
    }

    /// `POST path` with a JSON body.
    pub async fn post<D: DeserializeOwned>(&self, path: &str, body: Value) -> ApiOutcome<D> {
        self.execute(&ApiRequest::post(path, body)).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put<D: DeserializeOwned>(&self, path: &str, body: Value) -> ApiOutcome<D> {
        self.execute(&ApiRequest::put(path, body)).await
    }

    /// `DELETE path`.
    pub async fn delete<D: DeserializeOwned>(&self, path: &str) -> ApiOutcome<D> {
        self.execute(&ApiRequest::delete(path)).await
    }

    /// `GET path` with list parameters, decoding a page of items.
    pub async fn list<D: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> ApiOutcome<PageResponse<D>> {
        self.execute(&ApiRequest::get(path).with_list_query(query))
            .await
    }

    /// Checks that the backend accepts the current credential.
    pub async fn test_connection(&self) -> ApiOutcome<Value> {
        self.logger.info("Testing API connection", LogContext::new());
        let outcome = self.get::<Value>("/").await;
        match outcome.error_message() {
            None => self
                .logger
                .info("API connection successful", LogContext::new()),
            Some(message) => self.logger.error(
                "API connection failed",
                LogContext::new().with("error", message),
            ),
        }
        outcome
    }

    /// The credential store requests read from.
    #[must_use]
    pub const fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// The logger requests are recorded in.
    #[must_use]
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    /// The session monitor invalidated on rejected credentials.
    #[must_use]
    pub const fn session(&self) -> &SessionMonitor {
        &self.session
    }

    /// The client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}
