//! Admin endpoints over received applications.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::StoredApplication;
use crate::AppState;

/// GET /api/applications - List applications, newest first.
pub async fn list_applications(State(state): State<AppState>) -> ApiResult<Vec<StoredApplication>> {
    success(state.repo.list_applications().await?)
}

/// GET /api/applications/{id} - Get a single application.
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StoredApplication> {
    match state.repo.get_application(&id).await? {
        Some(application) => success(application),
        None => Err(AppError::NotFound(format!("Application {} not found", id))),
    }
}

/// GET /api/applications/{id}/attachments/{index} - Download one file.
pub async fn download_attachment(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, i64)>,
) -> Result<Response, AppError> {
    let blob = state.repo.get_attachment(&id, index).await?.ok_or_else(|| {
        AppError::NotFound(format!("Attachment {} of application {} not found", index, id))
    })?;

    let content_type = blob
        .meta
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    // Header values must be visible ASCII.
    let filename: String = blob
        .meta
        .filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        blob.data,
    )
        .into_response())
}
