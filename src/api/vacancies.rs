//! Vacancy catalog API endpoints.

use axum::extract::{Path, Query, RawQuery, State};
use serde::Serialize;

use super::{success, ApiResult, LangQuery};
use crate::catalog::{render_catalog, CatalogView, DetailPanel, DetailView, Location, OpenMode};
use crate::errors::AppError;
use crate::locale::Localize;
use crate::AppState;

/// An opened vacancy and the location that records it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VacancyDetailResponse {
    pub detail: DetailView,
    pub location: String,
}

/// GET /api/vacancies - Featured strip and full list.
pub async fn list_vacancies(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> ApiResult<CatalogView> {
    let table = state.locales.resolve(query.lang.as_deref());
    let mut view = render_catalog(&state.catalog);
    view.localize(table);
    success(view)
}

/// GET /api/vacancies/{slug} - Open one vacancy.
///
/// The returned location keeps the request's other query parameters.
pub async fn get_vacancy(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RawQuery(raw): RawQuery,
) -> ApiResult<VacancyDetailResponse> {
    let location = Location::new("/", raw.as_deref());
    let table = state
        .locales
        .resolve(location.param(crate::catalog::LANG_PARAM));

    let mut panel = DetailPanel::new();
    let opened = panel
        .open(&state.catalog, &slug, &location, OpenMode::RecordInUrl)
        .ok_or_else(|| AppError::NotFound(format!("Vacancy {} not found", slug)))?;

    let mut detail = panel
        .into_active()
        .ok_or_else(|| AppError::Internal("Detail panel empty after open".to_string()))?;
    detail.localize(table);

    success(VacancyDetailResponse {
        detail,
        location: opened.location.unwrap_or_default(),
    })
}
