//! Object-storage access for uploaded media files.
//!
//! The CMS writes uploads (and their derived size variants) to an
//! S3-compatible bucket; the storefront only ever deletes objects, as the
//! tail end of the media-deletion cascade.

mod s3;

pub use s3::S3Storage;

use thiserror::Error;

/// Errors from the object store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The object store answered with a non-success status.
    #[error("Object storage error ({status})")]
    Api { status: u16 },
}

/// Deletion interface over the media bucket.
///
/// Deletes are best-effort units of work: callers log and continue on
/// failure rather than aborting the surrounding operation.
#[allow(async_fn_in_trait)]
pub trait ObjectStorage: Send + Sync {
    /// Delete the object at `key`. Deleting a missing object is not an
    /// error (S3 semantics).
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory object store for tests; records every deleted key.
#[derive(Debug, Default)]
pub struct MemoryObjectStorage {
    deleted: std::sync::Mutex<Vec<String>>,
}

impl MemoryObjectStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys deleted so far, in order.
    pub fn deleted_keys(&self) -> Vec<String> {
        self.deleted
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl ObjectStorage for MemoryObjectStorage {
    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.deleted
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(key.to_string());
        Ok(())
    }
}
