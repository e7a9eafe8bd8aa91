//! Key/value blob storage boundary.
//!
//! The note collection is persisted as one opaque string under a single
//! key. Anything that can `get` and `set` strings asynchronously can
//! back the store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{AppError, Result};

/// Asynchronous string blob store keyed by string.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the blob stored under `key`, if any.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the blob stored under `key`.
    ///
    /// # Errors
    /// Returns error if the backend cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[async_trait]
impl<T: BlobStore + ?Sized> BlobStore for Box<T> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }
}

/// In-process blob store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    #[cfg(test)]
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }
}

fn poisoned() -> AppError {
    AppError::InvalidData {
        message: "Blob store lock poisoned".into(),
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
