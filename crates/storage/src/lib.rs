//! Object storage for uploaded audio and jacket images.
//!
//! [`MediaStore`] is the seam the track service depends on. Production uses
//! [`S3MediaStore`]; tests use [`InMemoryMediaStore`].

pub mod location;
pub mod memory;
pub mod s3;

use std::time::Duration;

use track1_core::error::CoreError;

pub use location::{object_key_from_location, object_location};
pub use memory::InMemoryMediaStore;
pub use s3::S3MediaStore;

/// Error type for object storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("upload of {bucket}/{key} failed: {message}")]
    Upload {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("lookup of {bucket}/{key} failed: {message}")]
    Head {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("delete from {bucket} failed: {message}")]
    Delete { bucket: String, message: String },

    #[error("storage call timed out after {0:?}")]
    TimedOut(Duration),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Delete { .. } => CoreError::StorageDelete(err.to_string()),
            other => CoreError::Internal(other.to_string()),
        }
    }
}

/// Bucket/key addressed blob store.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    /// Store `bytes` under `bucket/key`, returning the public location that
    /// gets persisted as the file reference.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Whether an object exists under `bucket/key`.
    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError>;

    /// Delete a single object. Deleting a missing object succeeds.
    async fn delete(&self, bucket: &str, key: &str) -> Result<(), StorageError>;

    /// Delete several objects in one batch. Any per-object failure fails the
    /// whole call.
    async fn delete_many(&self, bucket: &str, keys: &[String]) -> Result<(), StorageError>;
}
