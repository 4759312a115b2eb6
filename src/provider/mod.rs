//! Remote transcription provider: the external asynchronous job system.
//!
//! The provider is consumed, not implemented. A session submits one audio
//! payload, receives an opaque job ID, and polls until the job reaches a
//! terminal state. The finished utterances are fetched with a separate read
//! because the provider reports completion and the full payload on different
//! calls.

mod assemblyai;
mod poll;

pub use assemblyai::AssemblyAiClient;
pub use poll::{wait_until_completed, PollConfig};

use crate::transcript::RawUtterance;
use async_trait::async_trait;
use thiserror::Error;

/// Remote job status as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    /// Terminal failure with the provider-supplied detail string
    Error(String),
    /// Status label this client does not recognize; treated as in-flight
    Other(String),
}

impl JobStatus {
    /// Label used in poll log lines.
    pub fn label(&self) -> &str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Error(_) => "error",
            JobStatus::Other(label) => label,
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider rejected submission: {0}")]
    Rejected(String),

    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("job did not complete within {attempts} poll attempts")]
    Timeout { attempts: u32 },

    #[error("unexpected provider response: {0}")]
    Malformed(String),
}

/// Abstraction over the remote speech-to-text job system.
///
/// The concrete implementation is [`AssemblyAiClient`]; tests substitute a
/// scripted backend to drive the session pipeline without network access.
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    /// Upload one audio payload and start an asynchronous transcription job.
    /// Returns the provider's job ID.
    async fn submit(&self, audio: &[u8]) -> Result<String, ProviderError>;

    /// Query the current status of a job.
    async fn status(&self, job_id: &str) -> Result<JobStatus, ProviderError>;

    /// Fetch the finished utterances of a completed job.
    async fn utterances(&self, job_id: &str) -> Result<Vec<RawUtterance>, ProviderError>;
}
