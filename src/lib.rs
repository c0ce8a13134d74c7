//! Hiring landing service.
//!
//! Serves the landing page with its vacancy catalog and deep links, exposes
//! the catalog and locale tables as JSON, and receives applications through
//! the upload forms into SQLite.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod errors;
pub mod forms;
pub mod locale;
pub mod models;
pub mod stages;
pub mod view;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use catalog::Catalog;
use config::Config;
use db::Repository;
use locale::Locales;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub catalog: Arc<Catalog>,
    pub locales: Arc<Locales>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // Admin routes
    let admin_routes = Router::new()
        .route("/applications", get(api::list_applications))
        .route("/applications/{id}", get(api::get_application))
        .route(
            "/applications/{id}/attachments/{index}",
            get(api::download_attachment),
        )
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Public API routes
    let api_routes = Router::new()
        .route("/vacancies", get(api::list_vacancies))
        .route("/vacancies/{slug}", get(api::get_vacancy))
        .route("/locales/{lang}", get(api::get_locale))
        .route("/forms", get(api::list_forms))
        .merge(admin_routes);

    // Page routes
    let page_routes = Router::new()
        .route("/", get(api::landing_page))
        .route("/vacancies/{slug}", get(api::open_vacancy))
        .route("/forms/{form_id}", post(api::submit_form))
        .route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .layer(DefaultBodyLimit::max(state.config.body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
