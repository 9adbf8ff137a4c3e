//! Build mode selecting development or production defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};
use crate::log::LogLevel;

/// Build configuration the client runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Verbose logging, no log persistence.
    #[default]
    Development,
    /// INFO logging, persisted snapshot and collector delivery.
    Production,
}

impl BuildMode {
    /// Returns true for production builds.
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Default severity threshold for this mode.
    #[must_use]
    pub const fn default_log_level(self) -> LogLevel {
        match self {
            Self::Development => LogLevel::Debug,
            Self::Production => LogLevel::Info,
        }
    }

    /// Returns the mode name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildMode {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(DomainError::UnknownBuildMode(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_levels_per_mode() {
        assert_eq!(BuildMode::Development.default_log_level(), LogLevel::Debug);
        assert_eq!(BuildMode::Production.default_log_level(), LogLevel::Info);
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("Production".parse::<BuildMode>().unwrap(), BuildMode::Production);
        assert_eq!("dev".parse::<BuildMode>().unwrap(), BuildMode::Development);
        assert!("staging".parse::<BuildMode>().is_err());
    }
}
