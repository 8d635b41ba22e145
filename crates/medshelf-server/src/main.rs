//! Medicine inventory HTTP service.
//!
//! Serves the catalog CRUD/search API, the prescription-upload pipeline
//! (extraction + name reconciliation), and the grounded chat assistant.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use medshelf_core::db::Database;
use medshelf_providers::{GeminiClient, TavilyClient};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let db = Database::open(&config.db_path)
        .with_context(|| format!("opening database at {}", config.db_path))?;
    tracing::info!(path = %config.db_path, "database ready");

    let search = Arc::new(TavilyClient::new(&config.tavily_api_key));
    let assistant = Arc::new(GeminiClient::new(
        &config.google_api_key,
        &config.gemini_model,
    ));
    let state = AppState::new(db, search, assistant);

    let app = routes::router(state);
    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    tracing::info!(addr = %config.addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
