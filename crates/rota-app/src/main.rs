//! Rota application binary - composition root.
//!
//! Ties the workspace crates into a single executable:
//! 1. Load configuration from TOML
//! 2. Initialize tracing
//! 3. Open the SQLite record store
//! 4. Build the HR assistant pipeline (today is fixed at startup)
//! 5. Serve the REST API

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;

use rota_api::{create_router, AppState};
use rota_assistant::HrAssistant;
use rota_core::config::RotaConfig;
use rota_store::Database;

/// Resolve the config file path from `ROTA_CONFIG`, default `rota.toml`.
fn config_path() -> PathBuf {
    std::env::var_os("ROTA_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("rota.toml"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config first so its log level can seed the default filter.
    let config_file = config_path();
    let config = RotaConfig::load_or_default(&config_file);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Rota v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Record store.
    let data_dir = PathBuf::from(&config.general.data_dir);
    std::fs::create_dir_all(&data_dir)?;
    let db_path = data_dir.join("rota.db");
    let db = Arc::new(Database::new(&db_path)?);
    tracing::info!(path = %db_path.display(), "SQLite record store opened");

    // Assistant pipeline. "Today" is fixed once here so every retrieval
    // within the process observes the same date.
    let today = Local::now().date_naive();
    let assistant = HrAssistant::new(db, config.assistant.clone(), today);
    tracing::info!(%today, remote = config.assistant.remote.api_key.is_some(), "HR assistant ready");

    // API server.
    let router = create_router(AppState::new(assistant));
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "API server listening");

    axum::serve(listener, router).await?;
    Ok(())
}
