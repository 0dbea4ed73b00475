// Media handlers
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::GatewayError;
use crate::storage::ObjectMeta;
use crate::AppState;

/// Content type assumed when the store has none recorded
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A stored media file as reported by listings
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MediaFile {
    /// Object name; may contain path separators
    pub name: String,
    /// Object size in bytes
    pub size: u64,
    /// Stored content-type attribute, if the store records one
    pub content_type: Option<String>,
    /// Last modification time, RFC 3339
    pub last_modified: Option<String>,
}

impl From<ObjectMeta> for MediaFile {
    fn from(meta: ObjectMeta) -> Self {
        Self {
            name: meta.name,
            size: meta.size,
            content_type: meta.content_type,
            last_modified: meta.last_modified.map(|ts| ts.to_rfc3339()),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ListResponse {
    pub files: Vec<MediaFile>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub prefix: Option<String>,
}

fn require_filename(filename: &str) -> Result<&str, GatewayError> {
    if filename.is_empty() {
        return Err(GatewayError::MissingFilename);
    }
    Ok(filename)
}

/// List media files, optionally restricted to a name prefix
#[utoipa::path(
    get,
    path = "/media",
    tag = "media",
    params(
        ("prefix" = Option<String>, Query, description = "Only list names starting with this prefix"),
    ),
    responses(
        (status = 200, description = "Listing of stored media files", body = ListResponse),
        (status = 500, description = "Storage unconfigured or failing"),
    )
)]
pub async fn list_media(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, GatewayError> {
    let prefix = query.prefix.unwrap_or_default();
    tracing::info!(prefix = %prefix, "listing media files");

    let store = state.store.get().await?;
    let files = store
        .list(&prefix)
        .await?
        .into_iter()
        .map(MediaFile::from)
        .collect();

    Ok(Json(ListResponse { files }))
}

/// Fetch a media file's bytes
#[utoipa::path(
    get,
    path = "/media/{filename}",
    tag = "media",
    params(
        ("filename" = String, Path, description = "Object name; may contain path separators"),
    ),
    responses(
        (status = 200, description = "File content, served with its stored content type"),
        (status = 400, description = "Filename is required"),
        (status = 404, description = "File not found"),
        (status = 500, description = "Storage unconfigured or failing"),
    )
)]
pub async fn get_media(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, GatewayError> {
    let filename = require_filename(&filename)?;
    tracing::info!(filename, "fetching media file");

    let store = state.store.get().await?;
    let Some((data, content_type)) = store.get(filename).await? else {
        return Err(GatewayError::NotFound);
    };
    let content_type = content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|err| GatewayError::Store(err.into()))
}

/// Upload a media file, overwriting any previous object of the same name
#[utoipa::path(
    put,
    path = "/media/{filename}",
    tag = "media",
    params(
        ("filename" = String, Path, description = "Object name; may contain path separators"),
    ),
    request_body(content = Vec<u8>, description = "Raw file bytes"),
    responses(
        (status = 201, description = "File uploaded", body = UploadResponse),
        (status = 400, description = "Filename is required"),
        (status = 500, description = "Storage unconfigured or failing"),
    )
)]
pub async fn upload_media(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<UploadResponse>), GatewayError> {
    let filename = require_filename(&filename)?;
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE);
    tracing::info!(filename, content_type, size = body.len(), "uploading media file");

    let store = state.store.get().await?;
    store.put(filename, body, content_type).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            filename: filename.to_string(),
        }),
    ))
}

/// Delete a media file
#[utoipa::path(
    delete,
    path = "/media/{filename}",
    tag = "media",
    params(
        ("filename" = String, Path, description = "Object name; may contain path separators"),
    ),
    responses(
        (status = 200, description = "File deleted", body = DeleteResponse),
        (status = 400, description = "Filename is required"),
        (status = 404, description = "File not found"),
        (status = 500, description = "Storage unconfigured or failing"),
    )
)]
pub async fn delete_media(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<DeleteResponse>, GatewayError> {
    let filename = require_filename(&filename)?;
    tracing::info!(filename, "deleting media file");

    let store = state.store.get().await?;
    if !store.exists(filename).await? {
        return Err(GatewayError::NotFound);
    }
    store.delete(filename).await?;

    Ok(Json(DeleteResponse {
        message: "File deleted successfully".to_string(),
    }))
}

/// Answer for media routes reached without a filename segment
pub async fn missing_filename() -> GatewayError {
    GatewayError::MissingFilename
}
