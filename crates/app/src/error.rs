//! Errors reported by the command-line front end.

use janitor_application::{ApplicationError, TransportError};
use janitor_infrastructure::ExportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error("HTTP transport unavailable: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("invalid log collector endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },

    #[error("no data directory available, set {0}")]
    NoDataDir(&'static str),
}

pub type CliResult<T> = Result<T, CliError>;
