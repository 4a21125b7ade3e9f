//! S3-compatible object store backend

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};

use crate::config::StorageConfig;

use super::error::ContentStoreError;
use super::key::ContentKey;
use super::ContentStore;

/// Content store backed by an S3-compatible bucket.
pub struct ObjectContentStore {
    bucket: Box<Bucket>,
    max_size: u64,
}

impl ObjectContentStore {
    /// Build a store from configuration. Custom endpoints (MinIO, GCS
    /// interop) use path-style addressing.
    pub fn new(config: &StorageConfig, max_size: u64) -> Result<Self, ContentStoreError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse()
                .map_err(|e| ContentStoreError::Upstream(format!("invalid region: {e}")))?,
        };

        let credentials = Credentials::new(
            config.access_key.as_deref(),
            config.secret_key.as_deref(),
            None,
            None,
            None,
        )
        .map_err(|e| ContentStoreError::Upstream(format!("invalid credentials: {e}")))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| ContentStoreError::Upstream(e.to_string()))?;
        if config.endpoint.is_some() {
            bucket = bucket.with_path_style();
        }

        Ok(Self { bucket, max_size })
    }

    fn map_err(key: &ContentKey, err: s3::error::S3Error) -> ContentStoreError {
        match err {
            s3::error::S3Error::HttpFailWithBody(404, _) => {
                ContentStoreError::NotFound(key.to_string())
            }
            other => ContentStoreError::Upstream(other.to_string()),
        }
    }
}

#[async_trait]
impl ContentStore for ObjectContentStore {
    async fn put(&self, key: &ContentKey, content: &[u8]) -> Result<(), ContentStoreError> {
        if content.len() as u64 > self.max_size {
            return Err(ContentStoreError::SizeLimitExceeded {
                actual: content.len() as u64,
                limit: self.max_size,
            });
        }

        self.bucket
            .put_object(key.to_string(), content)
            .await
            .map_err(|e| Self::map_err(key, e))?;
        Ok(())
    }

    async fn get(&self, key: &ContentKey) -> Result<Vec<u8>, ContentStoreError> {
        let response = self
            .bucket
            .get_object(key.to_string())
            .await
            .map_err(|e| Self::map_err(key, e))?;
        Ok(response.bytes().to_vec())
    }

    async fn delete(&self, key: &ContentKey) -> Result<(), ContentStoreError> {
        match self.bucket.delete_object(key.to_string()).await {
            Ok(_) => Ok(()),
            // Deleting a missing blob is a no-op
            Err(s3::error::S3Error::HttpFailWithBody(404, _)) => Ok(()),
            Err(e) => Err(Self::map_err(key, e)),
        }
    }

    async fn size(&self, key: &ContentKey) -> Result<u64, ContentStoreError> {
        let (head, _status) = self
            .bucket
            .head_object(key.to_string())
            .await
            .map_err(|e| Self::map_err(key, e))?;

        head.content_length
            .map(|len| len as u64)
            .ok_or_else(|| ContentStoreError::NotFound(key.to_string()))
    }
}
