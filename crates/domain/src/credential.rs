//! The opaque API credential.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single opaque authentication token.
///
/// The value is never validated; absence of a credential means the client
/// is unauthenticated. `Debug` output is redacted so the token does not leak
/// into diagnostic logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Consumes the credential and returns the raw token.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let credential = Credential::new("sk-live-123");
        assert_eq!(format!("{credential:?}"), "Credential(***)");
        assert_eq!(credential.expose(), "sk-live-123");
    }

    #[test]
    fn serializes_as_plain_string() {
        let credential = Credential::from("abc");
        let json = serde_json::to_string(&credential).unwrap_or_default();
        assert_eq!(json, "\"abc\"");
    }
}
