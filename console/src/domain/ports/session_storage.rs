//! Port for the persisted client session entry.
//!
//! Storage is a tiny string key/value store. The session context keeps one
//! JSON entry in it; adapters decide where the bytes live.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session storage adapters.
    pub enum SessionStorageError {
        /// The key cannot be stored by this adapter.
        InvalidKey { key: String } =>
            "session storage key '{key}' is not allowed",
        /// Reading or writing the backing store failed.
        Io { message: String } =>
            "session storage failed: {message}",
    }
}

/// Synchronous string key/value storage.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStorage: Send + Sync {
    /// Read the value under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, SessionStorageError>;

    /// Replace the value under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), SessionStorageError>;

    /// Remove `key`; removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), SessionStorageError>;
}

/// Process-local storage for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemorySessionStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemorySessionStorage {
    /// Storage pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage.put(key, value);
        storage
    }

    fn put(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SessionStorageError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SessionStorageError> {
        self.put(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionStorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
