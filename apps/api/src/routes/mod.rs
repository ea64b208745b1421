pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Legacy upload path used by the web client
        .route("/analyze", post(handlers::handle_analyze))
        // Analysis API
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/roles", get(handlers::handle_list_roles))
        .route("/api/v1/roles/:name", get(handlers::handle_get_role))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
