use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::errors::StorageError;

use super::StoragePort;

/// In-memory store backing tests and hosts without durable storage.
///
/// The mutex makes each write atomic with respect to concurrent reads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    write_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of successful writes, for asserting write discipline
    /// (e.g. "a warm theme resolution performs zero writes").
    pub fn writes(&self) -> usize {
        self.write_count.load(Ordering::Relaxed)
    }
}

impl StoragePort for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        self.write_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("profileCompletion").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get_roundtrips() {
        let store = MemoryStore::new();
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let store = MemoryStore::new();
        store.set("profileCompletion", "71").unwrap();
        store.set("profileCompletion", "43").unwrap();
        assert_eq!(
            store.get("profileCompletion").unwrap().as_deref(),
            Some("43")
        );
        assert_eq!(store.writes(), 2);
    }
}
