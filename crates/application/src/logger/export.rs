//! Downloadable log export artifact.

use chrono::{DateTime, Utc};
use janitor_domain::LogEntry;

/// A serialized log buffer ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogExport {
    /// Suggested file name, embedding the export instant.
    pub file_name: String,
    /// Pretty-printed JSON array of entries.
    pub contents: String,
}

impl LogExport {
    /// Serializes `entries` without truncation.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry fails to serialize.
    pub fn from_entries(entries: &[LogEntry], at: DateTime<Utc>) -> serde_json::Result<Self> {
        Ok(Self {
            file_name: Self::file_name_for(at),
            contents: serde_json::to_string_pretty(entries)?,
        })
    }

    /// File name for an export taken at `at`. Colons are replaced so the
    /// name is valid on every filesystem.
    #[must_use]
    pub fn file_name_for(at: DateTime<Utc>) -> String {
        format!("app-logs-{}.json", at.format("%Y-%m-%dT%H-%M-%S%.3fZ"))
    }

    /// Parses the contents back into entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the contents are not a JSON array of entries.
    pub fn entries(&self) -> serde_json::Result<Vec<LogEntry>> {
        serde_json::from_str(&self.contents)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use janitor_domain::{LogContext, LogLevel, Origin};
    use pretty_assertions::assert_eq;

    #[test]
    fn file_name_embeds_instant() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            LogExport::file_name_for(at),
            "app-logs-2024-03-09T14-05-07.000Z.json"
        );
    }

    #[test]
    fn contents_parse_back_to_entries() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let entries = vec![LogEntry::new(
            at,
            LogLevel::Warn,
            "Resource not found",
            LogContext::new().with("url", "/task/3"),
            Origin::new("janitor/0.1.0", "/tasks"),
        )];
        let export = LogExport::from_entries(&entries, at).unwrap();
        assert!(export.contents.contains('\n'));
        assert_eq!(export.entries().unwrap(), entries);
    }
}
