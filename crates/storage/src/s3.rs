//! [`MediaStore`] backed by Amazon S3.

use std::future::Future;
use std::time::Duration;

use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use aws_sdk_s3::Client;

use crate::location::object_location;
use crate::{MediaStore, StorageError};

/// S3 client plus the region used to build public locations.
#[derive(Debug, Clone)]
pub struct S3MediaStore {
    client: Client,
    region: String,
    timeout: Duration,
}

impl S3MediaStore {
    /// Build a store from an existing SDK client.
    pub fn new(client: Client, region: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            region: region.into(),
            timeout,
        }
    }

    /// Load credentials from the standard AWS provider chain (env vars,
    /// profile, instance metadata) and build a store for `region`.
    pub async fn from_env(region: &str, timeout: Duration) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::new(Client::new(&sdk_config), region, timeout)
    }

    /// Run a storage call under the configured timeout.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, StorageError>>,
    ) -> Result<T, StorageError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| StorageError::TimedOut(self.timeout))?
    }
}

#[async_trait::async_trait]
impl MediaStore for S3MediaStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let size = bytes.len();
        self.bounded(async {
            self.client
                .put_object()
                .bucket(bucket)
                .key(key)
                .content_type(content_type)
                .body(ByteStream::from(bytes))
                .send()
                .await
                .map_err(|e| StorageError::Upload {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    message: DisplayErrorContext(&e).to_string(),
                })
        })
        .await?;

        tracing::info!(bucket, key, size, "Uploaded object to S3");
        Ok(object_location(bucket, &self.region, key))
    }

    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError> {
        self.bounded(async {
            match self.client.head_object().bucket(bucket).key(key).send().await {
                Ok(_) => Ok(true),
                Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(false),
                Err(err) => Err(StorageError::Head {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    message: DisplayErrorContext(&err).to_string(),
                }),
            }
        })
        .await
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.bounded(async {
            self.client
                .delete_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map_err(|e| StorageError::Delete {
                    bucket: bucket.to_string(),
                    message: DisplayErrorContext(&e).to_string(),
                })
        })
        .await?;

        tracing::info!(bucket, key, "Deleted object from S3");
        Ok(())
    }

    async fn delete_many(&self, bucket: &str, keys: &[String]) -> Result<(), StorageError> {
        if keys.is_empty() {
            return Ok(());
        }

        let delete_err = |message: String| StorageError::Delete {
            bucket: bucket.to_string(),
            message,
        };

        let objects = keys
            .iter()
            .map(|key| ObjectIdentifier::builder().key(key).build())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| delete_err(e.to_string()))?;
        let request = Delete::builder()
            .set_objects(Some(objects))
            .quiet(true)
            .build()
            .map_err(|e| delete_err(e.to_string()))?;

        let output = self
            .bounded(async {
                self.client
                    .delete_objects()
                    .bucket(bucket)
                    .delete(request)
                    .send()
                    .await
                    .map_err(|e| delete_err(DisplayErrorContext(&e).to_string()))
            })
            .await?;

        // Quiet mode only reports the objects that could not be deleted.
        if let Some(first) = output.errors().first() {
            return Err(delete_err(format!(
                "{} of {} objects failed, first: {} ({})",
                output.errors().len(),
                keys.len(),
                first.key().unwrap_or("?"),
                first.message().unwrap_or("no message"),
            )));
        }

        tracing::info!(bucket, count = keys.len(), "Deleted objects from S3");
        Ok(())
    }
}
