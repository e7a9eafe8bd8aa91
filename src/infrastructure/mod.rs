//! Infrastructure layer - external adapters (blob storage, filesystem).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod blob_store;
pub mod config;
pub mod persistence;
pub mod sqlite_store;

pub use blob_store::{BlobStore, MemoryBlobStore};
pub use config::{config_file_path, ensure_config_exists, load_config};
pub use persistence::{BlobPersistence, NotePersistence};
pub use sqlite_store::SqliteBlobStore;
