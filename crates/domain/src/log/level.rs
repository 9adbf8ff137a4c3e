//! Log severity levels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Severity of a log entry.
///
/// Levels are ordered by rank: `Error` is the most severe and has the lowest
/// rank, `Debug` the least severe and the highest rank. A threshold admits
/// every level whose rank is less than or equal to its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Critical failures.
    Error = 0,
    /// Client-caused or recoverable problems.
    Warn = 1,
    /// General information.
    Info = 2,
    /// Detailed debugging output.
    Debug = 3,
}

impl LogLevel {
    /// Returns all levels from most to least severe.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Error, Self::Warn, Self::Info, Self::Debug]
    }

    /// Returns the numeric rank (0 = ERROR .. 3 = DEBUG).
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Returns true if an entry at this level is recorded under `threshold`.
    #[must_use]
    pub const fn passes(self, threshold: Self) -> bool {
        self.rank() <= threshold.rank()
    }

    /// Returns the level name as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "ERROR" => Ok(Self::Error),
            "WARN" => Ok(Self::Warn),
            "INFO" => Ok(Self::Info),
            "DEBUG" => Ok(Self::Debug),
            other => Err(DomainError::UnknownLogLevel(other.to_string())),
        }
    }
}
