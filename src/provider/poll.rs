use super::{JobStatus, ProviderError, TranscriptionBackend};
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

/// Polling cadence and bound for one remote job.
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// Seconds between status checks
    pub interval_secs: u64,

    /// Give up after this many checks (~10 minutes at the default cadence)
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3,
            max_attempts: 200,
        }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Poll a submitted job at a fixed interval until it reaches a terminal
/// state.
///
/// `completed` resolves the wait; `error` fails with the provider's detail
/// string; anything else (queued, processing, unknown labels) keeps polling.
/// Jobs that are still in flight after `max_attempts` checks fail with
/// [`ProviderError::Timeout`] so a stuck job cannot pin its session task
/// forever. The sleep suspends only the owning task.
pub async fn wait_until_completed(
    backend: &dyn TranscriptionBackend,
    job_id: &str,
    config: &PollConfig,
) -> Result<(), ProviderError> {
    for attempt in 1..=config.max_attempts {
        let status = backend.status(job_id).await?;

        info!(job_id, attempt, status = status.label(), "Transcript polling status");

        match status {
            JobStatus::Completed => return Ok(()),
            JobStatus::Error(detail) => return Err(ProviderError::TranscriptionFailed(detail)),
            JobStatus::Queued | JobStatus::Processing | JobStatus::Other(_) => {
                tokio::time::sleep(config.interval()).await;
            }
        }
    }

    Err(ProviderError::Timeout {
        attempts: config.max_attempts,
    })
}
