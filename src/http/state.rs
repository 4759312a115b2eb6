use crate::provider::{PollConfig, TranscriptionBackend};
use crate::store::TranscriptStore;
use std::sync::Arc;

/// Shared application state for HTTP and WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    /// Finished transcripts (connection_id → segments)
    pub store: TranscriptStore,

    /// Remote transcription job system
    pub backend: Arc<dyn TranscriptionBackend>,

    /// Polling cadence for session tasks
    pub poll: PollConfig,
}

impl AppState {
    pub fn new(backend: Arc<dyn TranscriptionBackend>, poll: PollConfig) -> Self {
        Self {
            store: TranscriptStore::new(),
            backend,
            poll,
        }
    }
}
