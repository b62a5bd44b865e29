//! Public URL derivation for R2-stored objects.
//!
//! Two fixed schemes exist; configuration decides which one a deployment
//! returns. Hosts are never hard-coded at call sites.

pub(crate) const R2_STORAGE_HOST: &str = "r2.cloudflarestorage.com";
const R2_PUBLIC_HOST: &str = "r2.dev";

/// How public URLs are built for stored objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicUrlScheme {
    /// Direct storage-endpoint URL:
    /// `https://{account_id}.r2.cloudflarestorage.com/{bucket}/{key}`
    Endpoint { account_id: String, bucket: String },
    /// Public-distribution URL: `https://pub-{public_id}.r2.dev/{key}`
    PublicBucket { public_id: String },
}

impl PublicUrlScheme {
    pub fn url_for(&self, key: &str) -> String {
        match self {
            PublicUrlScheme::Endpoint { account_id, bucket } => {
                format!(
                    "https://{}.{}/{}/{}",
                    account_id, R2_STORAGE_HOST, bucket, key
                )
            }
            PublicUrlScheme::PublicBucket { public_id } => {
                format!("https://pub-{}.{}/{}", public_id, R2_PUBLIC_HOST, key)
            }
        }
    }
}
