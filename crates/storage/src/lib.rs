//! Storage layer for SkillForge
//!
//! This crate provides the local key-value storage used for device-level
//! preferences. A durable sled-backed store and a volatile in-memory store
//! share the [`PreferenceStore`] capability so callers never care which one
//! they were handed.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod memory;

pub use kv::{KvConfig, KvStore};
pub use memory::MemoryStore;

use thiserror::Error;

/// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Stored bytes were not valid UTF-8
    #[error("Invalid UTF-8 stored under key: {0}")]
    InvalidUtf8(String),
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// String-valued key-value capability used for preferences
///
/// Values are stored verbatim (no encoding), so a preference written as
/// `dark` reads back as exactly `dark`.
pub trait PreferenceStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, durably if the backend is durable
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`, returning whether it existed
    fn remove(&self, key: &str) -> Result<bool>;

    /// Flush pending writes (no-op for volatile stores)
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
