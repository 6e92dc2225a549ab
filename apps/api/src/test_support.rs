//! Shared helpers for handler-level tests: an `AppState` wired to the
//! in-memory store and a mock LLM endpoint.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::DocumentStore;

pub fn test_state(store: Arc<dyn DocumentStore>, llm_base_url: &str) -> AppState {
    AppState {
        store,
        llm: GeminiClient::new("test-key".to_string()).with_base_url(llm_base_url),
        config: Config {
            database_url: "postgres://unused".to_string(),
            gemini_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "info".to_string(),
        },
        estimation_in_flight: Arc::new(AtomicBool::new(false)),
    }
}

pub fn test_router(store: Arc<dyn DocumentStore>, llm_base_url: &str) -> Router {
    build_router(test_state(store, llm_base_url))
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
