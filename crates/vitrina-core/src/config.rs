//! Configuration module
//!
//! Environment-driven configuration for the upload service. Values are read
//! once at process start via [`Config::from_env`] and validated before the
//! server accepts any request.

use std::env;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_MAX_UPLOAD_MB: usize = 100;
const DEFAULT_STORAGE_TIMEOUT_SECS: u64 = 30;
const DEFAULT_R2_REGION: &str = "auto";

/// Which object-store backend serves uploads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    /// Cloudflare R2 (S3-compatible).
    R2,
    /// Local filesystem, for development and tests.
    Local,
}

/// How the upload endpoint decodes the request body.
///
/// One transport is active per deployment; all three normalize to the same
/// internal file value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UploadTransport {
    /// Incremental multipart/form-data parse of the request body.
    #[default]
    StreamingMultipart,
    /// Body buffered fully, then decoded as form data in one pass.
    WholeBodyForm,
    /// Entire body is the file payload; metadata comes from headers.
    RawBinary,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub max_upload_size_bytes: usize,
    pub upload_transport: UploadTransport,
    pub storage_timeout_secs: u64,
    pub storage_backend: StorageBackend,
    // R2 settings
    pub r2_account_id: Option<String>,
    pub r2_access_key_id: Option<String>,
    pub r2_secret_access_key: Option<String>,
    pub r2_bucket_name: Option<String>,
    pub r2_region: String,
    /// When set, public URLs use the `pub-{id}.r2.dev` distribution host
    /// instead of the storage endpoint.
    pub r2_public_id: Option<String>,
    // Local backend settings
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_UPLOAD_MB);

        let upload_transport = match env::var("UPLOAD_TRANSPORT")
            .unwrap_or_else(|_| "multipart".to_string())
            .to_lowercase()
            .as_str()
        {
            "multipart" => UploadTransport::StreamingMultipart,
            "form" => UploadTransport::WholeBodyForm,
            "binary" => UploadTransport::RawBinary,
            other => {
                return Err(anyhow::anyhow!(
                    "UPLOAD_TRANSPORT must be 'multipart', 'form', or 'binary' (got '{}')",
                    other
                ))
            }
        };

        let storage_backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "r2".to_string())
            .to_lowercase()
            .as_str()
        {
            "r2" | "s3" => StorageBackend::R2,
            "local" => StorageBackend::Local,
            other => {
                return Err(anyhow::anyhow!(
                    "STORAGE_BACKEND must be 'r2' or 'local' (got '{}')",
                    other
                ))
            }
        };

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            upload_transport,
            storage_timeout_secs: env::var("STORAGE_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_STORAGE_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_STORAGE_TIMEOUT_SECS),
            storage_backend,
            r2_account_id: env::var("R2_ACCOUNT_ID").ok().filter(|s| !s.is_empty()),
            r2_access_key_id: env::var("R2_ACCESS_KEY_ID").ok().filter(|s| !s.is_empty()),
            r2_secret_access_key: env::var("R2_SECRET_ACCESS_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
            r2_bucket_name: env::var("R2_BUCKET_NAME").ok().filter(|s| !s.is_empty()),
            r2_region: env::var("R2_REGION").unwrap_or_else(|_| DEFAULT_R2_REGION.to_string()),
            r2_public_id: env::var("R2_PUBLIC_ID").ok().filter(|s| !s.is_empty()),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok().filter(|s| !s.is_empty()),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        match self.storage_backend {
            StorageBackend::R2 => {
                if self.r2_account_id.is_none() {
                    return Err(anyhow::anyhow!(
                        "R2_ACCOUNT_ID must be set when using the r2 storage backend"
                    ));
                }
                if self.r2_access_key_id.is_none() || self.r2_secret_access_key.is_none() {
                    return Err(anyhow::anyhow!(
                        "R2_ACCESS_KEY_ID and R2_SECRET_ACCESS_KEY must be set when using the r2 storage backend"
                    ));
                }
                if self.r2_bucket_name.is_none() {
                    return Err(anyhow::anyhow!(
                        "R2_BUCKET_NAME must be set when using the r2 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using the local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using the local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server_port: 4000,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            max_upload_size_bytes: 100 * 1024 * 1024,
            upload_transport: UploadTransport::StreamingMultipart,
            storage_timeout_secs: 30,
            storage_backend: StorageBackend::Local,
            r2_account_id: None,
            r2_access_key_id: None,
            r2_secret_access_key: None,
            r2_bucket_name: None,
            r2_region: "auto".to_string(),
            r2_public_id: None,
            local_storage_path: Some("/tmp/vitrina".to_string()),
            local_storage_base_url: Some("http://localhost:4000/media".to_string()),
        }
    }

    #[test]
    fn local_backend_requires_path_and_base_url() {
        let mut config = base_config();
        assert!(config.validate().is_ok());

        config.local_storage_path = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn r2_backend_requires_credentials() {
        let mut config = base_config();
        config.storage_backend = StorageBackend::R2;
        assert!(config.validate().is_err());

        config.r2_account_id = Some("acct".to_string());
        config.r2_access_key_id = Some("key".to_string());
        config.r2_secret_access_key = Some("secret".to_string());
        config.r2_bucket_name = Some("media".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn is_production_matches_env_names() {
        let mut config = base_config();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
        config.environment = "prod".to_string();
        assert!(config.is_production());
    }
}
