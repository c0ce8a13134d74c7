//! Locale table endpoint for client-side re-localisation.

use std::collections::BTreeMap;

use axum::extract::{Path, State};

use super::{success, ApiResult};
use crate::AppState;

/// GET /api/locales/{lang} - Flattened translation table.
///
/// Unknown codes get the default language's table.
pub async fn get_locale(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> ApiResult<BTreeMap<String, String>> {
    success(state.locales.resolve(Some(&lang)).entries().clone())
}
