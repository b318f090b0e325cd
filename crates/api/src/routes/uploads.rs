//! Asset upload routes backed by object storage.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartError},
    http::StatusCode,
    routing::post,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{ApiError, AppState, middleware::AuthUser};
use folio_core::storage::{FileUpload, StorageConfig, StorageService};
use folio_shared::AppError;

/// Room for multipart boundaries, part headers and the `folder` field.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Request body cap for uploads: the configured file limit plus framing.
#[must_use]
pub fn body_limit(storage: Option<&StorageService>) -> usize {
    let max_file_size = storage.map_or(StorageConfig::DEFAULT_MAX_FILE_SIZE, |s| {
        s.config().max_file_size
    });
    usize::try_from(max_file_size)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD)
}

/// Creates the upload routes with the given request body cap.
pub fn routes(body_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/uploads", post(upload_file).delete(delete_file))
        .layer(DefaultBodyLimit::max(body_limit))
}

/// Response for a stored file.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Public URL of the object.
    pub url: String,
}

/// Request body for deleting a file.
#[derive(Debug, Deserialize)]
pub struct DeleteFileRequest {
    /// URL previously returned by the upload endpoint.
    pub url: String,
}

/// Response for a delete.
#[derive(Debug, Serialize)]
pub struct DeleteFileResponse {
    /// False if the URL is foreign or the provider refused.
    pub deleted: bool,
}

fn storage(state: &AppState) -> Result<&Arc<StorageService>, ApiError> {
    state
        .storage
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("File storage is not configured".to_string()).into())
}

fn bad_multipart(err: &MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(error = %err, "Upload exceeds request body limit");
        return AppError::PayloadTooLarge(err.body_text()).into();
    }
    warn!(error = %err, "Malformed multipart upload");
    AppError::Validation(err.body_text()).into()
}

/// POST /uploads - Multipart form with a `file` part and an optional `folder`.
async fn upload_file(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let storage = storage(&state)?;

    let mut file: Option<FileUpload> = None;
    let mut folder = String::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| bad_multipart(&e))? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data: Bytes = field.bytes().await.map_err(|e| bad_multipart(&e))?;
                file = Some(FileUpload {
                    file_name,
                    content_type,
                    data,
                });
            }
            Some("folder") => {
                folder = field.text().await.map_err(|e| bad_multipart(&e))?;
            }
            _ => {}
        }
    }

    let Some(file) = file else {
        return Err(AppError::Validation("Missing multipart field `file`".to_string()).into());
    };

    let folder = folder.trim().trim_matches('/');
    let url = storage.upload(file, folder).await?;
    info!(uploaded_by = %user.subject(), url = %url, "Upload stored");
    Ok(Json(UploadResponse { url }))
}

/// DELETE /uploads - Remove a previously uploaded file by URL.
async fn delete_file(
    State(state): State<AppState>,
    Json(request): Json<DeleteFileRequest>,
) -> Result<Json<DeleteFileResponse>, ApiError> {
    let deleted = storage(&state)?.delete(&request.url).await;
    Ok(Json(DeleteFileResponse { deleted }))
}
