// Shared test doubles for the remote job system.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;
use std::sync::Mutex;
use vox_relay::{JobStatus, PollConfig, ProviderError, RawUtterance, TranscriptionBackend};

pub fn fast_poll(max_attempts: u32) -> PollConfig {
    PollConfig {
        interval_secs: 0,
        max_attempts,
    }
}

pub fn utterance(text: &str, speaker: &str, start: u64, end: u64) -> RawUtterance {
    RawUtterance {
        text: text.to_string(),
        speaker: speaker.to_string(),
        start,
        end,
    }
}

/// Backend that replays a scripted status sequence. The last status repeats
/// if polling outlives the script.
pub struct ScriptedBackend {
    pub reject_submit: bool,
    statuses: Mutex<VecDeque<JobStatus>>,
    pub utterances: Vec<RawUtterance>,
    pub status_calls: AtomicU32,
}

impl ScriptedBackend {
    pub fn new(statuses: Vec<JobStatus>, utterances: Vec<RawUtterance>) -> Self {
        Self {
            reject_submit: false,
            statuses: Mutex::new(statuses.into()),
            utterances,
            status_calls: AtomicU32::new(0),
        }
    }

    pub fn rejecting() -> Self {
        let mut backend = Self::new(Vec::new(), Vec::new());
        backend.reject_submit = true;
        backend
    }
}

#[async_trait]
impl TranscriptionBackend for ScriptedBackend {
    async fn submit(&self, _audio: &[u8]) -> Result<String, ProviderError> {
        if self.reject_submit {
            return Err(ProviderError::Rejected("upload returned 400".to_string()));
        }
        Ok("job-1".to_string())
    }

    async fn status(&self, _job_id: &str) -> Result<JobStatus, ProviderError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let mut statuses = self.statuses.lock().unwrap();
        let status = if statuses.len() > 1 {
            statuses.pop_front().unwrap()
        } else {
            statuses.front().cloned().expect("script exhausted")
        };
        Ok(status)
    }

    async fn utterances(&self, _job_id: &str) -> Result<Vec<RawUtterance>, ProviderError> {
        Ok(self.utterances.clone())
    }
}
