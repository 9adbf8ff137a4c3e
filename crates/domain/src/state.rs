//! Session state observed by the composition root.
//!
//! The pipeline never navigates; it reports credential rejection by moving
//! the session to `Unauthenticated` and the application root reacts.

use serde::{Deserialize, Serialize};

/// Whether the client currently holds an accepted credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No credential, or the last one was rejected.
    #[default]
    Unauthenticated,
    /// A credential was accepted by the backend.
    Authenticated,
}

impl SessionState {
    /// Returns true when authenticated.
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated)
    }
}
