//! HTTP client for the Vitrina upload API.
//!
//! Provides a minimal client that POSTs files to `/api/upload` as multipart
//! form data and returns the public URL of the stored object. Uploads can
//! report progress through a [`ProgressObserver`], and
//! [`recorder::upload_and_record`] persists a media row only after the
//! server has confirmed the upload.

pub mod progress;
pub mod recorder;

use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use vitrina_core::UploadResponse;

pub use progress::{ProgressFn, ProgressObserver};
pub use recorder::MediaRecorder;

/// Upload endpoint path on the server.
pub const UPLOAD_PATH: &str = "/api/upload";

/// HTTP client for the Vitrina upload API.
#[derive(Clone, Debug)]
pub struct UploadClient {
    client: Client,
    base_url: String,
}

impl UploadClient {
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: VITRINA_API_URL (or API_URL).
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("VITRINA_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| "http://localhost:4000".to_string());

        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload a file from disk. Content type is guessed from the extension.
    pub async fn upload_file(&self, path: impl AsRef<Path>) -> Result<UploadResponse> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Path has no filename: {}", path.display()))?;

        let content_type = content_type_for(&filename);

        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file {}", path.display()))?;

        self.upload_bytes(Bytes::from(data), &filename, content_type)
            .await
    }

    /// Upload in-memory data as the multipart `file` field.
    pub async fn upload_bytes(
        &self,
        data: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<UploadResponse> {
        let part = Part::bytes(data.to_vec())
            .file_name(filename.to_string())
            .mime_str(content_type)
            .context("Invalid content type")?;

        self.send_upload(Form::new().part("file", part)).await
    }

    /// Upload in-memory data, notifying `observer` as the body is sent.
    pub async fn upload_bytes_with_progress(
        &self,
        data: Bytes,
        filename: &str,
        content_type: &str,
        observer: Arc<dyn ProgressObserver>,
    ) -> Result<UploadResponse> {
        let length = data.len() as u64;
        let stream = progress::progress_stream(data, observer);

        let part = Part::stream_with_length(Body::wrap_stream(stream), length)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .context("Invalid content type")?;

        self.send_upload(Form::new().part("file", part)).await
    }

    async fn send_upload(&self, form: Form) -> Result<UploadResponse> {
        let url = self.build_url(UPLOAD_PATH);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("Failed to send upload request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Upload failed with status {}: {}",
                status,
                error_text
            ));
        }

        let body: UploadResponse = response
            .json()
            .await
            .context("Failed to parse upload response as JSON")?;

        tracing::debug!(url = %body.url, "Upload confirmed");

        Ok(body)
    }
}

/// Guess a MIME type from the filename extension.
fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit('.')
        .next()
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
