//! Response stage: raw transport result to verdict.

use janitor_domain::{ApiError, ApiErrorKind, RawResponse, StatusCode};
use serde_json::Value;

use crate::ports::TransportError;

/// Classified outcome of one transport call.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// 2xx response.
    Success(RawResponse),
    /// 401 or 403: the credential was rejected.
    Unauthorized {
        /// Status received.
        status: StatusCode,
        /// Response body.
        body: Value,
    },
    /// 404.
    NotFound {
        /// Response body.
        body: Value,
    },
    /// 500.
    Server {
        /// Response body.
        body: Value,
    },
    /// Any other non-2xx status.
    UnexpectedStatus {
        /// Status received.
        status: StatusCode,
        /// Response body.
        body: Value,
    },
    /// The request went out but no response arrived.
    NoResponse {
        /// Transport diagnostic.
        reason: String,
    },
    /// The request could not be sent at all.
    SetupFailed {
        /// Transport diagnostic.
        message: String,
    },
}

/// Classifies a transport result. Status checks run before the
/// no-response and setup checks.
#[must_use]
pub fn classify(result: Result<RawResponse, TransportError>) -> Verdict {
    match result {
        Ok(response) => match response.status.as_u16() {
            200..=299 => Verdict::Success(response),
            401 | 403 => Verdict::Unauthorized {
                status: response.status,
                body: response.body,
            },
            404 => Verdict::NotFound {
                body: response.body,
            },
            500 => Verdict::Server {
                body: response.body,
            },
            _ => Verdict::UnexpectedStatus {
                status: response.status,
                body: response.body,
            },
        },
        Err(TransportError::NoResponse(reason)) => Verdict::NoResponse { reason },
        Err(TransportError::Setup(message)) => Verdict::SetupFailed { message },
    }
}

impl Verdict {
    /// Status of the response, when one was received.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Success(response) => Some(response.status),
            Self::Unauthorized { status, .. } | Self::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            Self::NotFound { .. } => Some(StatusCode::new(404)),
            Self::Server { .. } => Some(StatusCode::new(500)),
            Self::NoResponse { .. } | Self::SetupFailed { .. } => None,
        }
    }

    /// Body of the response, when one was received.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        match self {
            Self::Success(response) => Some(&response.body),
            Self::NotFound { body }
            | Self::Server { body }
            | Self::Unauthorized { body, .. }
            | Self::UnexpectedStatus { body, .. } => Some(body),
            Self::NoResponse { .. } | Self::SetupFailed { .. } => None,
        }
    }

    /// Returns true for a 2xx response.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Converts the verdict into the caller-facing result.
    ///
    /// # Errors
    ///
    /// Returns the classified `ApiError` for every non-success verdict.
    pub fn into_result(self) -> Result<RawResponse, ApiError> {
        match self {
            Self::Success(response) => Ok(response),
            Self::Unauthorized { status, .. } => {
                Err(ApiError::of(ApiErrorKind::Unauthorized).with_status(status.as_u16()))
            }
            Self::NotFound { .. } => Err(ApiError::of(ApiErrorKind::NotFound).with_status(404)),
            Self::Server { .. } => Err(ApiError::of(ApiErrorKind::Server).with_status(500)),
            Self::UnexpectedStatus { status, body } => Err(ApiError::new(
                ApiErrorKind::Unknown,
                format!("Request failed with status code {}", status.as_u16()),
            )
            .with_status(status.as_u16())
            .with_body(body)),
            Self::NoResponse { .. } => Err(ApiError::of(ApiErrorKind::Network)),
            Self::SetupFailed { message } => Err(ApiError::new(ApiErrorKind::Unknown, message)),
        }
    }
}
