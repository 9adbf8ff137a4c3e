//! Caller-facing request errors and the uniform result envelope.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Classification of a failed API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorKind {
    /// No response reached the client (connection failure or timeout).
    Network,
    /// The credential was rejected (401 or 403).
    Unauthorized,
    /// The resource does not exist (404).
    NotFound,
    /// The server failed (500).
    Server,
    /// Reserved for payload validation failures; never raised by the pipeline.
    Validation,
    /// Any other status or unmapped failure.
    Unknown,
}

impl ApiErrorKind {
    /// Default human-readable message for the kind.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Network => "Unable to reach the server",
            Self::Unauthorized => "Invalid or missing API key",
            Self::NotFound => "Resource not found",
            Self::Server => "Server error",
            Self::Validation => "Validation error",
            Self::Unknown => "Unexpected error",
        }
    }

    /// Stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network => "NETWORK",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound => "NOT_FOUND",
            Self::Server => "SERVER",
            Self::Validation => "VALIDATION",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified API failure with a stable kind and a diagnostic message.
///
/// For `Unknown` failures that carried a response, `status` and `body` keep
/// the raw values for upstream inspection.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    /// Failure class.
    pub kind: ApiErrorKind,
    /// Diagnostic message.
    pub message: String,
    /// HTTP status when a response was received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Response body when a response was received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl ApiError {
    /// Creates an error with an explicit message.
    #[must_use]
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// Creates an error carrying the kind's default message.
    #[must_use]
    pub fn of(kind: ApiErrorKind) -> Self {
        Self::new(kind, kind.default_message())
    }

    /// Attaches the response status.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches the response body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns true if the failure invalidated the session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.kind, ApiErrorKind::Unauthorized)
    }
}

/// Uniform result handed to resource callers.
///
/// Serializes as `{"success": true, "data": ...}` or
/// `{"success": false, "error": "<message>"}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    /// The call succeeded.
    Success(T),
    /// The call failed; the error is kept whole for callers that need the kind.
    Failure(ApiError),
}

impl<T> ApiOutcome<T> {
    /// Returns true on success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the data on success.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Returns the error on failure.
    #[must_use]
    pub const fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error().map(|error| error.message.as_str())
    }

    /// Maps the success value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            Self::Success(data) => ApiOutcome::Success(f(data)),
            Self::Failure(error) => ApiOutcome::Failure(error),
        }
    }

    /// Converts into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the contained `ApiError` on failure.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(error) => Err(error),
        }
    }
}

impl<T> From<Result<T, ApiError>> for ApiOutcome<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(error) => Self::Failure(error),
        }
    }
}

impl<T: Serialize> Serialize for ApiOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ApiOutcome", 2)?;
        match self {
            Self::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Failure(error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", &error.message)?;
            }
        }
        state.end()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn success_envelope_shape() {
        let outcome = ApiOutcome::Success(json!({"id": 1}));
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value, json!({"success": true, "data": {"id": 1}}));
    }

    #[test]
    fn failure_envelope_carries_message_only() {
        let outcome: ApiOutcome<Value> =
            ApiOutcome::Failure(ApiError::of(ApiErrorKind::NotFound).with_status(404));
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value, json!({"success": false, "error": "Resource not found"}));
        assert_eq!(outcome.error().map(|e| e.kind), Some(ApiErrorKind::NotFound));
    }

    #[test]
    fn kind_labels_are_stable() {
        assert_eq!(ApiErrorKind::NotFound.to_string(), "NOT_FOUND");
        assert_eq!(
            serde_json::to_value(ApiErrorKind::Unauthorized).unwrap(),
            json!("UNAUTHORIZED")
        );
    }

    #[test]
    fn outcome_round_trips_through_result() {
        let outcome: ApiOutcome<u32> = Err(ApiError::of(ApiErrorKind::Server)).into();
        assert!(!outcome.is_success());
        assert_eq!(outcome.error_message(), Some("Server error"));
        let ok: ApiOutcome<u32> = Ok(3).into();
        assert_eq!(ok.map(|n| n * 2).into_result().unwrap(), 6);
    }
}
