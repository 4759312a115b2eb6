//! One WebSocket session, end to end.
//!
//! A session accepts exactly one binary audio frame, drives the remote
//! transcription job to completion, stores the normalized transcript, and
//! replies with the connection ID the client will use for retrieval. Aborts
//! are fire-and-forget: the cause is logged with a stable classification
//! label, the client sees only a closed connection, and nothing is stored.

use crate::http::AppState;
use crate::provider::{wait_until_completed, PollConfig, ProviderError, TranscriptionBackend};
use crate::store::TranscriptStore;
use crate::transcript::normalize;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use std::io::Write;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Why a session aborted. Never surfaced to the client.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("websocket read failed: {0}")]
    Transport(String),

    #[error("first frame was not binary audio")]
    NotBinary,

    #[error("audio spool failed: {0}")]
    Spool(#[from] std::io::Error),

    #[error("submission failed: {0}")]
    Submit(ProviderError),

    #[error("polling failed: {0}")]
    Poll(ProviderError),

    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("job did not complete in time")]
    Timeout,

    #[error("utterance fetch failed: {0}")]
    Fetch(ProviderError),
}

impl SessionError {
    /// Stable label used in abort log lines, so failure classification can
    /// be asserted without a client-visible error surface.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::Transport(_) => "transport",
            SessionError::NotBinary => "not_binary",
            SessionError::Spool(_) => "spool",
            SessionError::Submit(_) => "submit",
            SessionError::Poll(_) => "poll",
            SessionError::Transcription(_) => "transcription",
            SessionError::Timeout => "timeout",
            SessionError::Fetch(_) => "fetch",
        }
    }
}

/// GET /ws — upgrade and hand the socket to a per-session task.
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let connection_id = Uuid::new_v4().to_string();
    info!(%connection_id, "New connection");

    let audio = match read_audio_frame(&mut socket).await {
        Ok(audio) => audio,
        Err(e) => {
            warn!(%connection_id, cause = e.kind(), error = %e, "Session aborted");
            return;
        }
    };

    let result = transcribe_payload(
        &state.store,
        state.backend.as_ref(),
        &state.poll,
        &connection_id,
        audio,
    )
    .await;

    match result {
        Ok(()) => {
            let reply = serde_json::json!({ "connection_id": connection_id }).to_string();
            if let Err(e) = socket.send(Message::Text(reply)).await {
                warn!(%connection_id, error = %e, "Failed to send connection ID");
            }
        }
        Err(e) => {
            warn!(%connection_id, cause = e.kind(), error = %e, "Session aborted");
        }
    }
    // Socket drops here on every path, closing the connection.
}

/// Read the single binary audio frame that opens a session. Anything else
/// (text frame, close, read error, client gone) aborts.
async fn read_audio_frame(socket: &mut WebSocket) -> Result<Vec<u8>, SessionError> {
    match socket.recv().await {
        Some(Ok(Message::Binary(audio))) => Ok(audio),
        Some(Ok(_)) => Err(SessionError::NotBinary),
        Some(Err(e)) => Err(SessionError::Transport(e.to_string())),
        None => Err(SessionError::Transport("connection closed".to_string())),
    }
}

/// Steps 2–6 of a session: spool, submit, await completion, fetch,
/// normalize, store. On success the transcript is visible in the store
/// under `connection_id` before this returns.
pub async fn transcribe_payload(
    store: &TranscriptStore,
    backend: &dyn TranscriptionBackend,
    poll: &PollConfig,
    connection_id: &str,
    audio: Vec<u8>,
) -> Result<(), SessionError> {
    // Session-scoped spool; the file is unlinked when `spool` drops,
    // on the error paths below as much as on success.
    let mut spool = NamedTempFile::new()?;
    spool.write_all(&audio)?;
    spool.flush()?;
    let payload = std::fs::read(spool.path())?;

    let job_id = backend
        .submit(&payload)
        .await
        .map_err(SessionError::Submit)?;

    wait_until_completed(backend, &job_id, poll)
        .await
        .map_err(|e| match e {
            ProviderError::TranscriptionFailed(detail) => SessionError::Transcription(detail),
            ProviderError::Timeout { .. } => SessionError::Timeout,
            other => SessionError::Poll(other),
        })?;

    // Completion and the full utterance payload are separate provider reads.
    let utterances = backend
        .utterances(&job_id)
        .await
        .map_err(SessionError::Fetch)?;

    let segments = normalize(utterances);
    store.put(connection_id.to_string(), segments).await;

    info!(%connection_id, %job_id, "Transcript stored");

    Ok(())
}
