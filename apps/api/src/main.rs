mod auth;
mod config;
mod errors;
mod estimation;
mod ingest;
mod knowledge;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::PgDocumentStore;
use crate::store::DocumentStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("salesbot_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Sales Bot API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the document store (single long-lived handle)
    let store = PgDocumentStore::connect(&config.database_url).await?;

    // Hydrate once before serving; a store failure here is fatal.
    let examples = store.list_examples().await?;
    let history = store.list_history().await?;
    info!(
        "Store hydrated: {} knowledge base entries, {} history entries",
        examples.len(),
        history.len()
    );

    // Initialize LLM client
    let llm = GeminiClient::new(config.gemini_api_key.clone());
    info!("LLM client initialized");

    // Build app state
    let state = AppState {
        store: Arc::new(store) as Arc<dyn DocumentStore>,
        llm,
        config: config.clone(),
        estimation_in_flight: Arc::new(AtomicBool::new(false)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
