//! In-memory key-value store.
//!
//! Used for non-persistent sessions and as the store behind tests. An
//! optional byte quota reproduces a full durable store.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::ports::{KeyValueStore, StorageError};

/// Thread-safe in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Creates an unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding at most `quota` bytes of keys and values.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Arc::default(),
            quota: Some(quota),
        }
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn used_bytes_without(entries: &HashMap<String, String>, key: &str) -> usize {
        entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write();
        if let Some(limit) = self.quota {
            let needed = Self::used_bytes_without(&entries, key) + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn quota_rejects_oversized_writes() {
        let store = MemoryStore::with_quota(8);
        store.set("a", "1234").unwrap();
        // replacing the same key only counts the new value
        store.set("a", "1234567").unwrap();
        let err = store.set("b", "123").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 8, .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clones_share_entries() {
        let store = MemoryStore::new();
        let clone = store.clone();
        clone.set("shared", "yes").unwrap();
        assert_eq!(store.get("shared").unwrap().as_deref(), Some("yes"));
    }
}
