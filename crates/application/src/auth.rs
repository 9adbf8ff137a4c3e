//! Login, logout and start-up credential restoration.

use janitor_domain::{LogContext, SessionState};
use thiserror::Error;

use crate::pipeline::ApiClient;
use crate::ports::{StorageError, Transport};

/// Login failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The submitted key was blank.
    #[error("API key is empty")]
    EmptyKey,

    /// The backend did not accept the key.
    #[error("API key rejected: {0}")]
    Rejected(String),

    /// The credential could not be stored or removed.
    #[error("credential storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// Drives the credential lifecycle on top of an [`ApiClient`].
pub struct Authenticator<T> {
    client: ApiClient<T>,
}

impl<T: Transport> Authenticator<T> {
    /// Creates an authenticator sharing `client`'s credential store,
    /// logger and session.
    #[must_use]
    pub const fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// Stores `raw_key` and verifies it against the backend.
    ///
    /// On rejection the key is removed again.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmptyKey` for blank input, `AuthError::Rejected`
    /// when the connection test fails, or a storage error.
    pub async fn login(&self, raw_key: &str) -> Result<(), AuthError> {
        let logger = self.client.logger();
        let key = raw_key.trim();
        if key.is_empty() {
            logger.warn("Login attempt with empty API key", LogContext::new());
            return Err(AuthError::EmptyKey);
        }

        logger.info("Login attempt started", LogContext::new());
        self.client.credentials().set(key)?;
        logger.info("API key saved", LogContext::new());

        let outcome = self.client.test_connection().await;
        if let Some(message) = outcome.error_message() {
            logger.warn("Login failed - invalid API key", LogContext::new());
            self.forget()?;
            return Err(AuthError::Rejected(message.to_string()));
        }

        logger.info("Login successful", LogContext::new());
        self.client.session().mark_authenticated();
        Ok(())
    }

    /// Removes the credential and marks the session unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential cannot be removed.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.forget()?;
        self.client.session().invalidate();
        self.client
            .logger()
            .info("User logged out", LogContext::new());
        Ok(())
    }

    /// Checks a credential left by a previous run.
    ///
    /// A valid credential authenticates the session; a rejected one is
    /// cleared.
    pub async fn restore(&self) -> SessionState {
        let logger = self.client.logger();
        logger.info("App initializing - checking authentication", LogContext::new());

        if !self.client.credentials().exists() {
            logger.info("No API key found", LogContext::new());
            return SessionState::Unauthenticated;
        }

        if self.client.test_connection().await.is_success() {
            logger.info("User authenticated successfully", LogContext::new());
            self.client.session().mark_authenticated();
            return SessionState::Authenticated;
        }

        logger.warn("Invalid API key - clearing", LogContext::new());
        if let Err(error) = self.forget() {
            logger.log_error(&error, LogContext::new());
        }
        SessionState::Unauthenticated
    }

    /// The underlying client.
    #[must_use]
    pub const fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    fn forget(&self) -> Result<(), AuthError> {
        self.client.credentials().clear()?;
        self.client
            .logger()
            .info("API key cleared - user logged out", LogContext::new());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::credentials::CredentialStore;
    use crate::logger::{Logger, LoggerSettings};
    use crate::pipeline::{AUTH_HEADER, ClientConfig};
    use crate::session::SessionMonitor;
    use crate::storage::MemoryStore;
    use crate::testing::{FakeTransport, FixedClock};
    use janitor_domain::RawResponse;
    use serde_json::Value;
    use std::sync::Arc;
    use url::Url;

    fn authenticator(transport: FakeTransport) -> (Authenticator<FakeTransport>, Arc<FakeTransport>) {
        let transport = Arc::new(transport);
        let client = ApiClient::new(
            Arc::clone(&transport),
            CredentialStore::new(Arc::new(MemoryStore::new())),
            Logger::builder(LoggerSettings::default(), FixedClock::arc()).build(),
            SessionMonitor::default(),
            ClientConfig::new(Url::parse("http://localhost:3000").unwrap()),
        );
        (Authenticator::new(client), transport)
    }

    fn has_message(auth: &Authenticator<FakeTransport>, message: &str) -> bool {
        auth.client()
            .logger()
            .get_logs()
            .iter()
            .any(|entry| entry.message == message)
    }

    #[tokio::test]
    async fn test_login_rejects_blank_key() {
        let (auth, transport) = authenticator(FakeTransport::default());
        let result = auth.login("   ").await;
        assert!(matches!(result, Err(AuthError::EmptyKey)));
        assert!(transport.sent().is_empty());
        assert!(has_message(&auth, "Login attempt with empty API key"));
    }

    #[tokio::test]
    async fn test_login_success_authenticates() {
        let (auth, transport) =
            authenticator(FakeTransport::always(RawResponse::new(200, Value::Null)));
        auth.login("  key-123 ").await.unwrap();

        assert_eq!(transport.sent()[0].header(AUTH_HEADER), Some("key-123"));
        assert_eq!(auth.client().credentials().get().unwrap().expose(), "key-123");
        assert!(auth.client().session().state().is_authenticated());
        assert!(has_message(&auth, "API key saved"));
    }

    #[tokio::test]
    async fn test_login_rejection_clears_key() {
        let (auth, _) = authenticator(FakeTransport::always(RawResponse::new(403, Value::Null)));
        let Err(AuthError::Rejected(message)) = auth.login("wrong").await else {
            panic!("expected rejection");
        };
        assert_eq!(message, "Invalid or missing API key");
        assert!(!auth.client().credentials().exists());
        assert!(!auth.client().session().state().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_and_invalidates() {
        let (auth, _) = authenticator(FakeTransport::always(RawResponse::new(200, Value::Null)));
        auth.login("key").await.unwrap();
        auth.logout().unwrap();
        assert!(!auth.client().credentials().exists());
        assert_eq!(auth.client().session().state(), SessionState::Unauthenticated);
        assert!(has_message(&auth, "API key cleared - user logged out"));
    }

    #[tokio::test]
    async fn test_restore_without_key() {
        let (auth, transport) = authenticator(FakeTransport::default());
        assert_eq!(auth.restore().await, SessionState::Unauthenticated);
        assert!(transport.sent().is_empty());
        assert!(has_message(&auth, "No API key found"));
    }

    #[tokio::test]
    async fn test_restore_with_valid_key() {
        let (auth, _) = authenticator(FakeTransport::always(RawResponse::new(200, Value::Null)));
        auth.client().credentials().set("saved").unwrap();
        assert_eq!(auth.restore().await, SessionState::Authenticated);
        assert!(auth.client().session().state().is_authenticated());
    }

    #[tokio::test]
    async fn test_restore_with_unreachable_backend_clears_key() {
        let (auth, _) = authenticator(FakeTransport::default());
        auth.client().credentials().set("saved").unwrap();
        assert_eq!(auth.restore().await, SessionState::Unauthenticated);
        assert!(!auth.client().credentials().exists());
        assert!(has_message(&auth, "Invalid API key - clearing"));
    }
}
