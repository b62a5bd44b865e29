//! Request-body transports for the upload endpoint.
//!
//! One transport is active per deployment (`UPLOAD_TRANSPORT`); all three
//! normalize the inbound request to the same [`ReceivedFile`] so the handler
//! behaves identically regardless of how the body arrived.

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use bytes::Bytes;
use vitrina_core::{AppError, ReceivedFile, UploadTransport};

/// Header carrying the original filename in the raw-binary transport.
pub const FILENAME_HEADER: &str = "x-filename";

/// The multipart field name clients put the file under.
pub const FILE_FIELD: &str = "file";

/// Decode the request body into a [`ReceivedFile`] using the configured
/// transport.
pub async fn extract_file(
    req: Request,
    transport: UploadTransport,
    max_body_bytes: usize,
) -> Result<ReceivedFile, AppError> {
    match transport {
        UploadTransport::StreamingMultipart => extract_streaming_multipart(req).await,
        UploadTransport::WholeBodyForm => extract_whole_body_form(req, max_body_bytes).await,
        UploadTransport::RawBinary => extract_raw_binary(req, max_body_bytes).await,
    }
}

/// Incremental multipart/form-data parse of the request body.
async fn extract_streaming_multipart(req: Request) -> Result<ReceivedFile, AppError> {
    // A request that is not multipart at all carries no file.
    let multipart = Multipart::from_request(req, &())
        .await
        .map_err(|_| AppError::NoFile)?;

    extract_multipart_file(multipart).await
}

/// Body buffered fully, then decoded as multipart form data in one pass.
///
/// Produces the same result as the streaming transport; only the buffering
/// strategy differs.
async fn extract_whole_body_form(
    req: Request,
    max_body_bytes: usize,
) -> Result<ReceivedFile, AppError> {
    let (parts, body) = req.into_parts();

    let bytes = axum::body::to_bytes(body, max_body_bytes)
        .await
        .map_err(|e| AppError::PayloadTooLarge(format!("Failed to buffer request body: {}", e)))?;

    let req = Request::from_parts(parts, axum::body::Body::from(bytes));
    let multipart = Multipart::from_request(req, &())
        .await
        .map_err(|_| AppError::NoFile)?;

    extract_multipart_file(multipart).await
}

/// Entire body is the file payload; metadata comes from headers.
///
/// Filename is taken from the `x-filename` header when present, content type
/// from `Content-Type`.
async fn extract_raw_binary(req: Request, max_body_bytes: usize) -> Result<ReceivedFile, AppError> {
    let (parts, body) = req.into_parts();

    let filename = parts
        .headers
        .get(FILENAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let data: Bytes = axum::body::to_bytes(body, max_body_bytes)
        .await
        .map_err(|e| AppError::PayloadTooLarge(format!("Failed to buffer request body: {}", e)))?;

    if data.is_empty() {
        return Err(AppError::NoFile);
    }

    Ok(ReceivedFile::new(data, filename, content_type))
}

/// Pull the single `file` field out of a multipart body.
async fn extract_multipart_file(mut multipart: Multipart) -> Result<ReceivedFile, AppError> {
    let mut file_data: Option<Bytes> = None;
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == FILE_FIELD {
            if file_data.is_some() {
                return Err(AppError::InvalidInput(
                    "Multiple file fields are not allowed; send exactly one field named 'file'"
                        .to_string(),
                ));
            }
            filename = field.file_name().map(|s: &str| s.to_string());
            content_type = field.content_type().map(|s: &str| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Internal(format!("Failed to read file data: {}", e)))?;

            file_data = Some(data);
        }
    }

    let data = file_data.ok_or(AppError::NoFile)?;

    Ok(ReceivedFile::new(data, filename, content_type))
}
