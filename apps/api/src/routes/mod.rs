pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::template::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Template API
        .route(
            "/api/v1/templates/validate",
            post(handlers::handle_validate),
        )
        .route("/api/v1/templates/repair", post(handlers::handle_repair))
        .route(
            "/api/v1/templates/repair-options",
            post(handlers::handle_repair_options),
        )
        .route("/api/v1/templates/render", post(handlers::handle_render))
        .with_state(state)
}
