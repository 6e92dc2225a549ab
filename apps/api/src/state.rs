use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Long-lived handle to the remote document store, owned by the
    /// composition root and never reconstructed per call.
    pub store: Arc<dyn DocumentStore>,
    pub llm: GeminiClient,
    pub config: Config,
    /// Set while an estimation call is in flight. At most one estimation
    /// runs per process; a concurrent submit is rejected with 409.
    pub estimation_in_flight: Arc<AtomicBool>,
}
