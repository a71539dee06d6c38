pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::sourcing::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/sourcing/run", post(handlers::handle_run))
        .with_state(state)
}
