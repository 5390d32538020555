//! In-process [`MediaStore`] used by tests and local development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;

use crate::location::object_location;
use crate::{MediaStore, StorageError};

/// Region used in the locations this store hands out.
const DEFAULT_REGION: &str = "ap-northeast-2";

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// Objects kept in a map keyed by `(bucket, key)`.
///
/// Lookups and deletes can be made to fail on demand to exercise error paths.
#[derive(Debug, Default)]
pub struct InMemoryMediaStore {
    region: String,
    objects: RwLock<HashMap<(String, String), StoredObject>>,
    fail_deletes: AtomicBool,
    fail_lookups: AtomicBool,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            ..Default::default()
        }
    }

    /// Make every subsequent delete fail (or succeed again).
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `exists` call fail (or succeed again).
    pub fn set_fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    /// Whether `bucket/key` is currently stored.
    pub async fn contains(&self, bucket: &str, key: &str) -> bool {
        self.objects
            .read()
            .await
            .contains_key(&(bucket.to_string(), key.to_string()))
    }

    /// Content type recorded for `bucket/key`.
    pub async fn content_type(&self, bucket: &str, key: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(&(bucket.to_string(), key.to_string()))
            .map(|o| o.content_type.clone())
    }

    /// Number of objects across all buckets.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_deletes(&self, bucket: &str) -> Result<(), StorageError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::Delete {
                bucket: bucket.to_string(),
                message: "simulated delete failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let object = StoredObject {
            bytes,
            content_type: content_type.to_string(),
        };
        tracing::debug!(bucket, key, size = object.bytes.len(), "Stored object in memory");
        self.objects
            .write()
            .await
            .insert((bucket.to_string(), key.to_string()), object);
        Ok(object_location(bucket, &self.region, key))
    }

    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(StorageError::Head {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: "simulated lookup failure".to_string(),
            });
        }
        Ok(self.contains(bucket, key).await)
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.check_deletes(bucket)?;
        self.objects
            .write()
            .await
            .remove(&(bucket.to_string(), key.to_string()));
        Ok(())
    }

    async fn delete_many(&self, bucket: &str, keys: &[String]) -> Result<(), StorageError> {
        self.check_deletes(bucket)?;
        let mut objects = self.objects.write().await;
        for key in keys {
            objects.remove(&(bucket.to_string(), key.clone()));
        }
        Ok(())
    }
}
