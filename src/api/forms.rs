//! Upload form endpoints.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde_json::Value;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::forms::{review, FormConfig, Incoming, IntakeOutcome, ServerReply, LANG_FIELD};
use crate::AppState;

/// GET /api/forms - Configuration of every page form.
pub async fn list_forms() -> ApiResult<Vec<FormConfig>> {
    success(FormConfig::presets())
}

/// POST /forms/{form_id} - Receive one submission.
///
/// Validation failures are regular `200` replies carrying the error map.
pub async fn submit_form(
    State(state): State<AppState>,
    Path(form_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let config = FormConfig::by_selector(&form_id)
        .ok_or_else(|| AppError::NotFound(format!("Form {} not found", form_id)))?;

    let incoming = Incoming::from_multipart(multipart).await?;
    let table = state.locales.resolve(incoming.value(LANG_FIELD));
    let files = incoming.files().len();

    let reply = match review(&config, &state.catalog, table, incoming) {
        IntakeOutcome::Accepted(application) => {
            let stored = state.repo.insert_application(&application).await?;
            tracing::info!(
                form = %config.selector,
                id = %stored.id,
                attachments = stored.attachments.len(),
                "Application received"
            );
            ServerReply::Success
        }
        IntakeOutcome::Rejected(errors) => {
            tracing::debug!(form = %config.selector, files, "Returning error map");
            ServerReply::Rejected(errors)
        }
    };

    Ok(Json(reply.to_json()))
}
