//! Vitrina Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! storage-key construction shared across all Vitrina components.

pub mod config;
pub mod error;
pub mod keys;
pub mod models;

// Re-export commonly used types
pub use config::{Config, StorageBackend, UploadTransport};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use keys::{build_storage_key, sanitize_filename};
pub use models::{
    MediaRecord, MediaType, ReceivedFile, Role, SessionContext, UploadResponse,
};
