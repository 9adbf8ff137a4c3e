//! Persistent credential storage.
//!
//! Holds at most one API key, persisted through a `KeyValueStore` so it
//! survives restarts. Absence of a key means the client is unauthenticated.

use std::sync::Arc;

use janitor_domain::Credential;

use crate::ports::{KeyValueStore, StorageError};

/// Storage key under which the credential is persisted.
pub const CREDENTIAL_KEY: &str = "bug_tracker_api_key";

/// Process-wide holder of the single active credential.
///
/// Clones share the same backing store; the last write wins.
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    /// Creates a credential store over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stores `token`, replacing any existing credential. The token format
    /// is not validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    pub fn set(&self, token: impl Into<Credential>) -> Result<(), StorageError> {
        let credential = token.into();
        self.store.set(CREDENTIAL_KEY, credential.expose())
    }

    /// Returns the current credential. Unreadable storage counts as absent.
    #[must_use]
    pub fn get(&self) -> Option<Credential> {
        self.store
            .get(CREDENTIAL_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
            .map(Credential::from)
    }

    /// Removes the credential. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(CREDENTIAL_KEY)
    }

    /// Returns true if a credential is stored.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.get().is_some()
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("authenticated", &self.exists())
            .finish()
    }
}
