//! Vitrina Storage Library
//!
//! Object-store abstraction and implementations for Vitrina. The
//! [`ObjectStorage`] trait covers the single synchronous PUT the upload
//! service performs plus the read/delete operations tests and tooling need.
//!
//! Backends also own public URL derivation: the R2 backend returns either a
//! storage-endpoint URL or a `pub-{id}.r2.dev` distribution URL depending on
//! configuration, and the local backend serves files under its base URL.

pub mod factory;
pub mod local;
pub mod r2;
pub mod traits;
pub mod url;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use r2::R2Storage;
pub use traits::{ObjectStorage, StorageError, StorageResult};
pub use url::PublicUrlScheme;
