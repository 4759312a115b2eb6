// Integration tests for the session pipeline: spool, submit, poll, fetch,
// normalize, store. The remote job system is replaced with a scripted
// backend so terminal-state classification can be asserted directly.

mod common;

use async_trait::async_trait;
use common::{fast_poll, utterance, ScriptedBackend};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use tokio::sync::{oneshot, Notify};
use vox_relay::{
    transcribe_payload, JobStatus, ProviderError, RawUtterance, SessionError, TranscriptStore,
    TranscriptionBackend,
};

#[tokio::test]
async fn test_successful_session_stores_normalized_transcript() {
    let store = TranscriptStore::new();
    let backend = ScriptedBackend::new(
        vec![
            JobStatus::Queued,
            JobStatus::Processing,
            JobStatus::Completed,
        ],
        vec![
            utterance("hello there", "A", 0, 2840),
            utterance("hi", "B", 2840, 5860),
        ],
    );

    transcribe_payload(&store, &backend, &fast_poll(10), "conn-1", vec![1, 2, 3])
        .await
        .expect("session should succeed");

    let segments = store.get("conn-1").await.expect("transcript stored");
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].text, "hello there");
    assert_eq!(segments[0].start, 0.0);
    assert_eq!(segments[0].end, 2.84);
    assert_eq!(segments[1].start, 2.84);
    assert_eq!(segments[1].end, 5.86);

    // One poll per scripted status
    assert_eq!(backend.status_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_provider_error_status_aborts_with_detail() {
    let store = TranscriptStore::new();
    let backend = ScriptedBackend::new(
        vec![
            JobStatus::Processing,
            JobStatus::Error("audio file is corrupt".to_string()),
        ],
        Vec::new(),
    );

    let err = transcribe_payload(&store, &backend, &fast_poll(10), "conn-1", vec![0u8; 16])
        .await
        .expect_err("session should abort");

    assert_eq!(err.kind(), "transcription");
    match err {
        SessionError::Transcription(detail) => assert_eq!(detail, "audio file is corrupt"),
        other => panic!("unexpected error: {other:?}"),
    }

    // Nothing stored on the abort path
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_stuck_job_aborts_with_timeout() {
    let store = TranscriptStore::new();
    let backend = ScriptedBackend::new(vec![JobStatus::Processing], Vec::new());

    let err = transcribe_payload(&store, &backend, &fast_poll(3), "conn-1", vec![0u8; 16])
        .await
        .expect_err("session should abort");

    assert_eq!(err.kind(), "timeout");
    assert_eq!(backend.status_calls.load(Ordering::SeqCst), 3);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_rejected_submission_aborts_before_polling() {
    let store = TranscriptStore::new();
    let backend = ScriptedBackend::rejecting();

    let err = transcribe_payload(&store, &backend, &fast_poll(10), "conn-1", vec![0u8; 16])
        .await
        .expect_err("session should abort");

    assert_eq!(err.kind(), "submit");
    assert_eq!(backend.status_calls.load(Ordering::SeqCst), 0);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_two_concurrent_sessions_are_independent() {
    let store = TranscriptStore::new();
    let backend = Arc::new(ScriptedBackend::new(
        vec![JobStatus::Completed],
        vec![utterance("shared result", "A", 0, 1000)],
    ));

    let sessions = ["conn-a", "conn-b"].map(|id| {
        let store = store.clone();
        let backend = backend.clone();
        tokio::spawn(async move {
            transcribe_payload(&store, backend.as_ref(), &fast_poll(5), id, vec![0u8; 8]).await
        })
    });

    for result in futures::future::join_all(sessions).await {
        result.unwrap().expect("session should succeed");
    }

    assert_eq!(store.len().await, 2);
    assert!(store.get("conn-a").await.is_some());
    assert!(store.get("conn-b").await.is_some());
}

/// Backend that signals when polling has started, then holds the job
/// in-flight until released.
struct GatedBackend {
    started: Mutex<Option<oneshot::Sender<()>>>,
    release: Arc<Notify>,
}

#[async_trait]
impl TranscriptionBackend for GatedBackend {
    async fn submit(&self, _audio: &[u8]) -> Result<String, ProviderError> {
        Ok("job-1".to_string())
    }

    async fn status(&self, _job_id: &str) -> Result<JobStatus, ProviderError> {
        if let Some(tx) = self.started.lock().unwrap().take() {
            let _ = tx.send(());
        }
        self.release.notified().await;
        Ok(JobStatus::Completed)
    }

    async fn utterances(&self, _job_id: &str) -> Result<Vec<RawUtterance>, ProviderError> {
        Ok(vec![utterance("done", "A", 0, 1000)])
    }
}

#[tokio::test]
async fn test_no_partial_record_visible_while_polling() {
    let store = TranscriptStore::new();
    let (started_tx, started_rx) = oneshot::channel();
    let release = Arc::new(Notify::new());
    let backend = Arc::new(GatedBackend {
        started: Mutex::new(Some(started_tx)),
        release: release.clone(),
    });

    let task_store = store.clone();
    let task_backend = backend.clone();
    let session = tokio::spawn(async move {
        transcribe_payload(
            &task_store,
            task_backend.as_ref(),
            &fast_poll(10),
            "conn-1",
            vec![0u8; 16],
        )
        .await
    });

    // Session is mid-poll: retrieval must see nothing
    started_rx.await.unwrap();
    assert!(store.get("conn-1").await.is_none());

    release.notify_one();
    session.await.unwrap().expect("session should succeed");

    assert_eq!(store.get("conn-1").await.unwrap()[0].text, "done");
}
