use super::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

/// GET /transcription/:id
/// Fetch a finished transcript by connection ID.
///
/// Absence is deliberately ambiguous: an unknown ID, a session still
/// polling, and an aborted session all answer 404. Clients retry.
pub async fn get_transcription(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.get(&id).await {
        Some(segments) => (StatusCode::OK, Json(segments.as_ref().clone())).into_response(),
        None => (StatusCode::NOT_FOUND, "Transcription not found").into_response(),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
