use super::{JobStatus, ProviderError, TranscriptionBackend};
use crate::transcript::RawUtterance;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

const DEFAULT_BASE_URL: &str = "https://api.assemblyai.com";

/// HTTP client for the AssemblyAI v2 transcript API.
///
/// Submission is two calls: upload the raw bytes, then create a transcript
/// job pointing at the returned upload URL. Status and the finished
/// utterances both come from `GET /v2/transcript/{id}`.
pub struct AssemblyAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    id: String,
    status: String,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UtterancesResponse {
    utterances: Option<Vec<RawUtterance>>,
}

impl AssemblyAiClient {
    pub fn new(api_key: String) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url,
        })
    }

    async fn fetch_transcript(&self, job_id: &str) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .http
            .get(format!("{}/v2/transcript/{}", self.base_url, job_id))
            .header("authorization", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Malformed(format!(
                "transcript lookup for {} returned {}",
                job_id,
                response.status()
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl TranscriptionBackend for AssemblyAiClient {
    async fn submit(&self, audio: &[u8]) -> Result<String, ProviderError> {
        debug!("Uploading {} bytes of audio", audio.len());

        let upload = self
            .http
            .post(format!("{}/v2/upload", self.base_url))
            .header("authorization", &self.api_key)
            .body(audio.to_vec())
            .send()
            .await?;

        if !upload.status().is_success() {
            return Err(ProviderError::Rejected(format!(
                "upload returned {}",
                upload.status()
            )));
        }

        let upload: UploadResponse = upload
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("upload response: {}", e)))?;

        let created = self
            .http
            .post(format!("{}/v2/transcript", self.base_url))
            .header("authorization", &self.api_key)
            .json(&json!({
                "audio_url": upload.upload_url,
                "format_text": true,
                "punctuate": true,
                "speaker_labels": true,
            }))
            .send()
            .await?;

        if !created.status().is_success() {
            return Err(ProviderError::Rejected(format!(
                "transcript creation returned {}",
                created.status()
            )));
        }

        let created: TranscriptResponse = created
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("transcript response: {}", e)))?;

        info!("Submitted transcription job {}", created.id);

        Ok(created.id)
    }

    async fn status(&self, job_id: &str) -> Result<JobStatus, ProviderError> {
        let transcript: TranscriptResponse = self
            .fetch_transcript(job_id)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("status response: {}", e)))?;

        let status = match transcript.status.as_str() {
            "queued" => JobStatus::Queued,
            "processing" => JobStatus::Processing,
            "completed" => JobStatus::Completed,
            "error" => JobStatus::Error(
                transcript
                    .error
                    .unwrap_or_else(|| "unspecified provider error".to_string()),
            ),
            other => JobStatus::Other(other.to_string()),
        };

        Ok(status)
    }

    async fn utterances(&self, job_id: &str) -> Result<Vec<RawUtterance>, ProviderError> {
        let payload: UtterancesResponse = self
            .fetch_transcript(job_id)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("utterances response: {}", e)))?;

        // A completed job with speaker_labels enabled always carries
        // utterances; a missing array means we were called too early.
        payload.utterances.ok_or_else(|| {
            ProviderError::Malformed(format!("job {} has no utterances payload", job_id))
        })
    }
}
