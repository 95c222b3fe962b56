pub mod health;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::entries::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/entries",
            get(handlers::handle_list_entries).post(handlers::handle_create_entry),
        )
        .route("/api/entries/summary", get(handlers::handle_summary))
        .route("/api/entries/:id", get(handlers::handle_get_entry))
        .route(
            "/api/entries/:id/archive",
            patch(handlers::handle_archive_entry),
        )
        // Path used by the original dashboard client
        .route(
            "/api/productivity",
            get(handlers::handle_list_entries).post(handlers::handle_create_entry),
        )
        .with_state(state)
}
