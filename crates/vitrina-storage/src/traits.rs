//! Storage abstraction trait
//!
//! This module defines the [`ObjectStorage`] trait that all storage backends
//! must implement, so the upload service works with any backend without
//! coupling to implementation details.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use vitrina_core::config::StorageBackend;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Object-store abstraction.
///
/// `put` is the one write the upload endpoint performs: a single awaited
/// call, fully written or failed, never partial. Keys are produced by
/// `vitrina_core::keys` and must not contain `..` or a leading `/`.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Write an object under `key` with the given content type.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<()>;

    /// Read an object by its storage key.
    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    /// Delete an object by its storage key.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if an object exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Derive the credential-free public URL for a stored object.
    ///
    /// Which URL scheme is used is a static per-deployment decision made at
    /// backend construction, never per request.
    fn public_url(&self, key: &str) -> String;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
