//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use vitrina_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vitrina API",
        version = "0.1.0",
        description = "File-upload bridge between a media admin panel and S3-compatible object storage (Cloudflare R2). Files POSTed to /api/upload are stored under a timestamped key and answered with their public URL."
    ),
    paths(handlers::upload::upload, handlers::health::health_check),
    components(schemas(models::UploadResponse, error::ErrorResponse)),
    tags(
        (name = "upload", description = "File upload endpoint"),
        (name = "health", description = "Health probes")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
