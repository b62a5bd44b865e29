//! Domain models shared between the upload server and its clients.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One file extracted from an inbound upload request, normalized across all
/// body transports.
#[derive(Debug, Clone)]
pub struct ReceivedFile {
    pub data: Bytes,
    /// Original filename as declared by the client. Absent in the raw-binary
    /// transport when no `x-filename` header is sent.
    pub filename: Option<String>,
    pub content_type: String,
}

impl ReceivedFile {
    pub fn new(data: Bytes, filename: Option<String>, content_type: Option<String>) -> Self {
        Self {
            data,
            filename,
            content_type: content_type
                .unwrap_or_else(|| "application/octet-stream".to_string()),
        }
    }
}

/// Successful upload response: the public URL of the stored object.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub url: String,
}

/// Coarse media classification derived from the declared MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Audio,
    Other,
}

impl MediaType {
    /// Classify a MIME type by its top-level type.
    pub fn from_mime(content_type: &str) -> Self {
        let primary = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim()
            .split('/')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match primary.as_str() {
            "image" => MediaType::Image,
            "video" => MediaType::Video,
            "audio" => MediaType::Audio,
            _ => MediaType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Audio => "audio",
            MediaType::Other => "other",
        }
    }
}

/// Media row the caller persists after a confirmed upload. The upload server
/// never writes this; it belongs to the external record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRecord {
    pub category_id: i64,
    pub file_url: String,
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

/// Role of the current user, as established by the external auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Explicit session context passed into components that need the current
/// user's role. The upload server itself takes no session dependency.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub role: Role,
}

impl SessionContext {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
