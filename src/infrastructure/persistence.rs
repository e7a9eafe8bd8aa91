//! Persistence adapter between the note store and a blob store.

use async_trait::async_trait;

use super::blob_store::BlobStore;
use crate::domain::{config::DEFAULT_STORAGE_KEY, AppError, Note, Result};

/// Loads and saves the whole note collection as one unit.
#[async_trait]
pub trait NotePersistence: Send + Sync {
    /// Read the last saved collection. `None` when nothing was saved yet.
    ///
    /// # Errors
    /// Returns error if the snapshot cannot be read or decoded.
    async fn load(&self) -> Result<Option<Vec<Note>>>;

    /// Replace the saved collection.
    ///
    /// # Errors
    /// Returns error if the snapshot cannot be encoded or written.
    async fn save(&self, notes: &[Note]) -> Result<()>;
}

/// Stores the collection as a JSON array under a single blob key.
pub struct BlobPersistence<B> {
    blobs: B,
    key: String,
}

impl<B: BlobStore> BlobPersistence<B> {
    /// Use the default `"notes"` key.
    pub fn new(blobs: B) -> Self {
        Self::with_key(blobs, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(blobs: B, key: impl Into<String>) -> Self {
        Self {
            blobs,
            key: key.into(),
        }
    }

    /// The underlying blob store.
    #[cfg(test)]
    pub const fn blobs(&self) -> &B {
        &self.blobs
    }
}

#[async_trait]
impl<B: BlobStore> NotePersistence for BlobPersistence<B> {
    async fn load(&self) -> Result<Option<Vec<Note>>> {
        let Some(raw) = self.blobs.get(&self.key).await? else {
            return Ok(None);
        };

        let notes: Vec<Note> = serde_json::from_str(&raw).map_err(AppError::json_parse)?;
        tracing::debug!(key = %self.key, count = notes.len(), "Loaded note snapshot");

        Ok(Some(notes))
    }

    async fn save(&self, notes: &[Note]) -> Result<()> {
        let raw = serde_json::to_string(notes).map_err(AppError::json_parse)?;
        self.blobs.set(&self.key, &raw).await?;

        tracing::debug!(key = %self.key, count = notes.len(), "Saved note snapshot");
        Ok(())
    }
}
