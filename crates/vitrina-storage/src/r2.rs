use crate::traits::{ObjectStorage, StorageError, StorageResult};
use crate::url::{PublicUrlScheme, R2_STORAGE_HOST};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, Attributes, ClientOptions, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
    Result as ObjectResult,
};
use std::time::Duration;
use vitrina_core::config::StorageBackend;

/// Cloudflare R2 storage implementation (S3-compatible).
#[derive(Clone)]
pub struct R2Storage {
    store: AmazonS3,
    bucket: String,
    url_scheme: PublicUrlScheme,
}

impl R2Storage {
    /// Create a new R2Storage instance.
    ///
    /// # Arguments
    /// * `account_id` - Cloudflare account identifier; determines the storage
    ///   endpoint `https://{account_id}.r2.cloudflarestorage.com`
    /// * `access_key_id` / `secret_access_key` - R2 API token credentials
    /// * `bucket` - Bucket name
    /// * `region` - Region identifier; R2 uses `auto`
    /// * `public_id` - When set, public URLs use the `pub-{id}.r2.dev`
    ///   distribution host instead of the storage endpoint
    /// * `timeout_secs` - Bound on each storage request so the HTTP response
    ///   is never held indefinitely
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account_id: String,
        access_key_id: String,
        secret_access_key: String,
        bucket: String,
        region: String,
        public_id: Option<String>,
        timeout_secs: u64,
    ) -> StorageResult<Self> {
        let endpoint = format!("https://{}.{}", account_id, R2_STORAGE_HOST);

        let store = AmazonS3Builder::new()
            .with_endpoint(endpoint)
            .with_region(region)
            .with_bucket_name(bucket.clone())
            .with_access_key_id(access_key_id)
            .with_secret_access_key(secret_access_key)
            .with_client_options(
                ClientOptions::new().with_timeout(Duration::from_secs(timeout_secs)),
            )
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        let url_scheme = match public_id {
            Some(public_id) => PublicUrlScheme::PublicBucket { public_id },
            None => PublicUrlScheme::Endpoint {
                account_id,
                bucket: bucket.clone(),
            },
        };

        Ok(R2Storage {
            store,
            bucket,
            url_scheme,
        })
    }
}

#[async_trait]
impl ObjectStorage for R2Storage {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<()> {
        let size = data.len() as u64;
        let location = Path::from(key.to_string());

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let opts = PutOptions::from(attributes);

        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(data), opts)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "R2 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            content_type = %content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "R2 upload successful"
        );

        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        let start = std::time::Instant::now();
        let location = Path::from(key.to_string());

        let result: ObjectResult<_> = self.store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(key.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "R2 download failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = bytes.len() as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "R2 download successful"
        );

        Ok(bytes)
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let location = Path::from(key.to_string());

        let result: ObjectResult<_> = self.store.delete(&location).await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                "R2 delete failed"
            );
            StorageError::DeleteFailed(e.to_string())
        })?;

        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let location = Path::from(key.to_string());
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn public_url(&self, key: &str) -> String {
        self.url_scheme.url_for(key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::R2
    }
}
