//! File-backed key-value store.
//!
//! All keys live in one JSON object file inside the data directory:
//! - Linux: ~/.local/share/janitor/storage.json
//! - macOS: ~/Library/Application Support/janitor/storage.json
//! - Windows: %APPDATA%/janitor/storage.json

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use janitor_application::ports::{KeyValueStore, StorageError};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Name of the store file inside the data directory.
pub const STORE_FILE_NAME: &str = "storage.json";

/// Returns the platform data directory for the client, if available.
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("janitor"))
}

/// Renders the entries with 2-space indentation, keys in sorted order and a
/// trailing newline, so unchanged stores produce identical files.
fn encode(entries: &BTreeMap<String, String>) -> Result<String, StorageError> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"  "));
    entries
        .serialize(&mut serializer)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    let mut content =
        String::from_utf8(buffer).map_err(|e| StorageError::Serialization(e.to_string()))?;
    content.push('\n');
    Ok(content)
}

fn decode(content: &str) -> Result<BTreeMap<String, String>, StorageError> {
    serde_json::from_str(content).map_err(|e| {
        StorageError::Serialization(format!("unreadable store file: {e}"))
    })
}

/// Key-value store persisted to a single JSON file.
///
/// Entries are cached in memory and the file is rewritten on every change.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl FileKeyValueStore {
    /// Opens the store in `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or an existing
    /// store file cannot be parsed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(STORE_FILE_NAME);

        let entries = match fs::read_to_string(&path) {
            Ok(content) => decode(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened key-value store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
            quota: None,
        })
    }

    /// Limits the total size of keys and values in bytes.
    #[must_use]
    pub const fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    /// Path of the store file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_quota(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let Some(limit) = self.quota else {
            return Ok(());
        };
        let needed = entries.iter().map(|(k, v)| k.len() + v.len()).sum();
        if needed > limit {
            return Err(StorageError::QuotaExceeded { needed, limit });
        }
        Ok(())
    }

    /// Writes `entries` through a temporary file so a crash never leaves a
    /// truncated store.
    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = encode(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.check_quota(&next)?;
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();
        store.set("bug_tracker_api_key", "secret").unwrap();
        drop(store);

        let reopened = FileKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get("bug_tracker_api_key").unwrap().as_deref(),
            Some("secret")
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);

        let reopened = FileKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("k").unwrap(), None);
    }

    #[test]
    fn test_failed_write_keeps_memory_and_disk_in_step() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();
        store.set("bug_tracker_api_key", "secret").unwrap();
        // a directory where the temp file goes makes every flush fail
        fs::create_dir(store.path().with_extension("json.tmp")).unwrap();

        assert!(store.remove("bug_tracker_api_key").is_err());
        assert!(store.set("app_logs", "[]").is_err());

        assert_eq!(
            store.get("bug_tracker_api_key").unwrap().as_deref(),
            Some("secret")
        );
        assert_eq!(store.get("app_logs").unwrap(), None);
        let reopened = FileKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get("bug_tracker_api_key").unwrap().as_deref(),
            Some("secret")
        );
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileKeyValueStore::open(&nested).unwrap();
        store.set("k", "v").unwrap();
        assert!(nested.join(STORE_FILE_NAME).is_file());
        assert_eq!(store.path(), nested.join(STORE_FILE_NAME));
    }

    #[test]
    fn test_quota_rejects_and_keeps_previous_state() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap().with_quota(10);
        store.set("k", "12345").unwrap();
        let error = store.set("k", "1234567890").unwrap_err();
        assert!(matches!(error, StorageError::QuotaExceeded { limit: 10, .. }));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("12345"));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(STORE_FILE_NAME), "{broken").unwrap();
        let error = FileKeyValueStore::open(dir.path()).unwrap_err();
        assert!(matches!(error, StorageError::Serialization(_)));
    }

    #[test]
    fn test_file_is_stable_json() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();
        store.set("b", "2").unwrap();
        store.set("a", "1").unwrap();
        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "{\n  \"a\": \"1\",\n  \"b\": \"2\"\n}\n");
    }
}
