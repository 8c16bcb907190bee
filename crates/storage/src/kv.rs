//! Durable key-value store for preferences
//!
//! This module provides a small, durable key-value store using sled. Every
//! write is flushed before returning.

use sled::Db;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{PreferenceStore, Result, StorageError};

/// Key-value store configuration
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Database path
    pub path: PathBuf,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Enable compression
    pub use_compression: bool,
    /// Flush interval in milliseconds (None for flush-on-write only)
    pub flush_every_ms: Option<u64>,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("skillforge_kv.db"),
            cache_capacity: 8 * 1024 * 1024, // 8MB
            use_compression: true,
            flush_every_ms: None,
        }
    }
}

impl KvConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Set cache capacity in bytes
    pub fn cache_capacity(mut self, bytes: u64) -> Self {
        self.cache_capacity = bytes;
        self
    }

    /// Enable or disable compression
    pub fn use_compression(mut self, enabled: bool) -> Self {
        self.use_compression = enabled;
        self
    }

    /// Set background flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// Sled-backed key-value store
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Db>,
}

impl KvStore {
    /// Open (or create) a key-value store with configuration
    pub fn new(config: KvConfig) -> Result<Self> {
        let db = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .use_compression(config.use_compression)
            .flush_every_ms(config.flush_every_ms)
            .open()?;

        tracing::debug!(path = %config.path.display(), "opened key-value store");

        Ok(Self { db: Arc::new(db) })
    }

    /// Create a temporary key-value store (for testing)
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a string value by key
    pub fn get_str(&self, key: &str) -> Result<Option<String>> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|_| StorageError::InvalidUtf8(key.to_string())),
            None => Ok(None),
        }
    }

    /// Set a string value by key and flush it to disk
    pub fn set_str(&self, key: &str, value: &str) -> Result<()> {
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }

    /// Remove a value by key
    pub fn remove_key(&self, key: &str) -> Result<bool> {
        Ok(self.db.remove(key.as_bytes())?.is_some())
    }

    /// Get the number of keys in the store
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

impl PreferenceStore for KvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.get_str(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_str(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        self.remove_key(key)
    }

    fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_kv_store_creation() {
        let store = KvStore::temporary().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let store = KvStore::temporary().unwrap();
        store.set_str("theme", "dark").unwrap();

        assert_eq!(store.get_str("theme").unwrap(), Some("dark".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_values_are_stored_verbatim() {
        let store = KvStore::temporary().unwrap();
        store.set_str("theme", "light").unwrap();

        let raw = store.db.get(b"theme").unwrap().unwrap();
        assert_eq!(&raw[..], b"light");
    }

    #[test]
    fn test_get_nonexistent() {
        let store = KvStore::temporary().unwrap();
        assert_eq!(store.get_str("missing").unwrap(), None);
    }

    #[test]
    fn test_invalid_utf8() {
        let store = KvStore::temporary().unwrap();
        store.db.insert(b"broken", vec![0xffu8, 0xfe]).unwrap();

        let err = store.get_str("broken").unwrap_err();
        assert!(matches!(err, StorageError::InvalidUtf8(key) if key == "broken"));
    }

    #[test]
    fn test_remove() {
        let store = KvStore::temporary().unwrap();
        store.set_str("theme", "dark").unwrap();

        assert!(store.remove_key("theme").unwrap());
        assert!(!store.remove_key("theme").unwrap());
        assert_eq!(store.get_str("theme").unwrap(), None);
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.db");

        {
            let store = KvStore::new(KvConfig::new(&path)).unwrap();
            PreferenceStore::set(&store, "theme", "dark").unwrap();
        }

        let store = KvStore::new(KvConfig::new(&path)).unwrap();
        assert_eq!(PreferenceStore::get(&store, "theme").unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn test_config_builder() {
        let config = KvConfig::new("/tmp/test.db")
            .cache_capacity(1024)
            .use_compression(false)
            .flush_every_ms(Some(100));

        assert_eq!(config.path, PathBuf::from("/tmp/test.db"));
        assert_eq!(config.cache_capacity, 1024);
        assert!(!config.use_compression);
        assert_eq!(config.flush_every_ms, Some(100));
    }
}
