//! Upload endpoint handler.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use vitrina_core::{build_storage_key, AppError, MediaType, UploadResponse};

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::transport;

/// Upload a file and return its public URL.
///
/// The request body is decoded by the configured transport, the file is
/// written to object storage under a `{unix_millis}_{filename}` key, and the
/// credential-free public URL of the stored object is returned. Nothing is
/// written on any error path, and each request performs exactly one storage
/// write.
///
/// # Errors
/// - `AppError::NoFile` - body carries no file
/// - `AppError::InvalidInput` - malformed body or filename
/// - `AppError::PayloadTooLarge` - body exceeds the configured limit
/// - `AppError::Storage` - object-store write failure
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "upload",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadResponse),
        (status = 400, description = "No file provided", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Upload failed", body = ErrorResponse)
    )
)]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    req: Request,
) -> Result<Response, HttpAppError> {
    let file = transport::extract_file(
        req,
        state.config.upload_transport,
        state.config.max_upload_size_bytes,
    )
    .await?;

    if file.data.len() > state.config.max_upload_size_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "{} bytes exceeds max {} bytes",
            file.data.len(),
            state.config.max_upload_size_bytes
        ))
        .into());
    }

    let key = build_storage_key(file.filename.as_deref()).map_err(AppError::InvalidInput)?;

    tracing::debug!(
        key = %key,
        size_bytes = file.data.len(),
        content_type = %file.content_type,
        media_type = MediaType::from_mime(&file.content_type).as_str(),
        "Received upload"
    );

    state
        .storage
        .put(&key, file.data, &file.content_type)
        .await?;

    let url = state.storage.public_url(&key);

    Ok((StatusCode::OK, Json(UploadResponse { url })).into_response())
}

/// Fallback for non-POST requests to the upload route.
///
/// Runs before any body decoding; no storage interaction happens on this path.
pub async fn method_not_allowed() -> Response {
    HttpAppError(AppError::MethodNotAllowed).into_response()
}
