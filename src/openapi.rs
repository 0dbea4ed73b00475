use utoipa::OpenApi;

use crate::handlers::{health, media};

/// Generate the OpenAPI documentation for the entire API
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        health::check,

        // Media endpoints
        media::list_media,
        media::get_media,
        media::upload_media,
        media::delete_media,
    ),
    components(
        schemas(
            // Health schemas
            health::HealthResponse,

            // Media schemas
            media::MediaFile,
            media::ListResponse,
            media::UploadResponse,
            media::DeleteResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "media", description = "Media file storage endpoints"),
    )
)]
pub struct ApiDoc;
