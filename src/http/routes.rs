use super::handlers;
use super::state::AppState;
use crate::session;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Audio ingest (one binary frame per connection)
        .route("/ws", get(session::ws_upgrade))
        // Transcript retrieval
        .route("/transcription/:id", get(handlers::get_transcription))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
