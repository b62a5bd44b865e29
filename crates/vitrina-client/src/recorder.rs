//! Media-record persistence after a confirmed upload.
//!
//! The upload server never writes media rows; the caller persists them in an
//! external record store once the server has answered 2xx. On any upload
//! failure no record is written.

use crate::UploadClient;
use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use vitrina_core::{MediaRecord, MediaType, SessionContext};

/// Persists media rows in the external record store.
#[async_trait]
pub trait MediaRecorder: Send + Sync {
    async fn record(&self, record: &MediaRecord) -> Result<()>;
}

/// Upload a file and persist its media row.
///
/// Ordering is strict: the admin check runs before any network traffic, and
/// the recorder runs only after the server confirms the upload. An upload
/// error propagates without touching the record store.
pub async fn upload_and_record(
    client: &UploadClient,
    session: &SessionContext,
    recorder: &dyn MediaRecorder,
    category_id: i64,
    data: Bytes,
    filename: &str,
    content_type: &str,
) -> Result<MediaRecord> {
    if !session.is_admin() {
        return Err(anyhow::anyhow!("Only admins can upload media"));
    }

    let response = client.upload_bytes(data, filename, content_type).await?;

    let record = MediaRecord {
        category_id,
        file_url: response.url,
        media_type: MediaType::from_mime(content_type),
        extension: extension_of(filename),
    };

    recorder.record(&record).await?;

    tracing::info!(
        file_url = %record.file_url,
        category_id = record.category_id,
        media_type = record.media_type.as_str(),
        "Media record persisted"
    );

    Ok(record)
}

fn extension_of(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension_of("photo.PNG").as_deref(), Some("png"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of("noextension"), None);
    }
}
