pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::extraction;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/evaluate", post(handlers::handle_evaluate))
        .route("/api/v1/extract", post(extraction::handle_extract))
        .with_state(state)
}
