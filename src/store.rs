use crate::transcript::Segment;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Concurrent map from connection ID to a finished transcript.
///
/// Records are inserted exactly once per session, after normalization, and
/// never updated or removed. Writers take the lock exclusively so a reader
/// either sees a complete record or nothing; readers proceed concurrently
/// with each other. The store is owned by whoever builds the app state and
/// handed to both the session task and the retrieval handler (no process-wide
/// singleton).
#[derive(Clone, Default)]
pub struct TranscriptStore {
    inner: Arc<RwLock<HashMap<String, Arc<Vec<Segment>>>>>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a finished transcript under a fresh connection ID.
    ///
    /// IDs are freshly generated UUIDs, so a key is never written twice.
    pub async fn put(&self, id: String, segments: Vec<Segment>) {
        let mut map = self.inner.write().await;
        map.insert(id, Arc::new(segments));
    }

    /// Look up a transcript. `None` covers unknown IDs, sessions still
    /// polling, and sessions that aborted — callers cannot tell these apart
    /// and are expected to retry.
    pub async fn get(&self, id: &str) -> Option<Arc<Vec<Segment>>> {
        let map = self.inner.read().await;
        map.get(id).cloned()
    }

    /// Number of stored transcripts.
    pub async fn len(&self) -> usize {
        let map = self.inner.read().await;
        map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
