pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::auth;
use crate::estimation;
use crate::ingest;
use crate::knowledge::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/auth/login", post(auth::handle_login))
        // Knowledge base
        .route(
            "/api/v1/examples",
            get(handlers::handle_list_examples).post(handlers::handle_create_example),
        )
        .route("/api/v1/examples/:id", delete(handlers::handle_delete_example))
        .route(
            "/api/v1/examples/:id/attachment",
            get(handlers::handle_example_attachment),
        )
        // Estimation history
        .route("/api/v1/history", get(handlers::handle_list_history))
        .route(
            "/api/v1/history/:id/attachment",
            get(handlers::handle_history_attachment),
        )
        // Ingestion and estimation
        .route("/api/v1/ingest", post(ingest::handlers::handle_ingest))
        .route("/api/v1/estimate", post(estimation::handlers::handle_estimate))
        // Destructive bulk wipe; requires confirm=true in the body
        .route("/api/v1/admin/clear", post(handlers::handle_clear_all))
        .with_state(state)
}
