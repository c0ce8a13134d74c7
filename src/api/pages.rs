//! Landing page and vacancy deep links.

use axum::{
    extract::{Path, RawQuery, State},
    response::{Html, Redirect},
};

use crate::catalog::{DetailPanel, Location, OpenMode, CLOSED_LOCATION};
use crate::errors::AppError;
use crate::view::LandingPage;
use crate::AppState;

/// GET / - The landing page; `?vacancy=<id>` opens the detail panel.
pub async fn landing_page(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Html<String>, AppError> {
    let location = Location::new("/", raw.as_deref());
    let page = LandingPage::build(&state.catalog, &state.locales, &location)?;
    Ok(Html(page.to_html()?))
}

/// GET /vacancies/{slug} - Select a vacancy and record it in the location.
///
/// Unknown and closed vacancies lead back to the bare page.
pub async fn open_vacancy(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RawQuery(raw): RawQuery,
) -> Redirect {
    let location = Location::new("/", raw.as_deref());
    let target = DetailPanel::new()
        .open(&state.catalog, &slug, &location, OpenMode::RecordInUrl)
        .and_then(|opened| opened.location)
        .unwrap_or_else(|| CLOSED_LOCATION.to_string());
    Redirect::to(&target)
}
