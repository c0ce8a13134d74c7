//! Hiring landing server binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hiring_landing::catalog::Catalog;
use hiring_landing::config::{Config, LogFormat};
use hiring_landing::db::{self, Repository};
use hiring_landing::locale::Locales;
use hiring_landing::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting hiring landing");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Default language: {}", config.default_lang);
    tracing::info!("Static assets: {:?}", config.static_dir);

    // Warn if PSK is not configured
    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (LANDING_API_PSK). Admin routes are open!");
    }

    // Static tables; refuse to start on a broken one
    let catalog = Arc::new(Catalog::embedded()?);
    let locales = Arc::new(Locales::embedded(config.default_lang)?);
    tracing::info!("Catalog loaded with {} vacancies", catalog.vacancies().len());

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    let state = AppState {
        repo,
        catalog,
        locales,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
