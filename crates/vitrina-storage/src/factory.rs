use crate::local::LocalStorage;
use crate::r2::R2Storage;
use crate::traits::{ObjectStorage, StorageError, StorageResult};
use std::sync::Arc;
use vitrina_core::config::{Config, StorageBackend};

/// Build the storage backend selected by configuration.
///
/// Called once at startup; the process refuses to serve requests when the
/// selected backend cannot be constructed.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn ObjectStorage>> {
    match config.storage_backend {
        StorageBackend::R2 => {
            let account_id = require(&config.r2_account_id, "R2_ACCOUNT_ID")?;
            let access_key_id = require(&config.r2_access_key_id, "R2_ACCESS_KEY_ID")?;
            let secret_access_key = require(&config.r2_secret_access_key, "R2_SECRET_ACCESS_KEY")?;
            let bucket = require(&config.r2_bucket_name, "R2_BUCKET_NAME")?;

            let storage = R2Storage::new(
                account_id,
                access_key_id,
                secret_access_key,
                bucket.clone(),
                config.r2_region.clone(),
                config.r2_public_id.clone(),
                config.storage_timeout_secs,
            )?;

            tracing::info!(bucket = %bucket, "Initialized R2 storage backend");
            Ok(Arc::new(storage))
        }
        StorageBackend::Local => {
            let path = require(&config.local_storage_path, "LOCAL_STORAGE_PATH")?;
            let base_url = require(&config.local_storage_base_url, "LOCAL_STORAGE_BASE_URL")?;

            let storage = LocalStorage::new(path.clone(), base_url).await?;

            tracing::info!(path = %path, "Initialized local storage backend");
            Ok(Arc::new(storage))
        }
    }
}

fn require(value: &Option<String>, name: &str) -> StorageResult<String> {
    value
        .clone()
        .ok_or_else(|| StorageError::ConfigError(format!("{} is not set", name)))
}
