pub mod config;
pub mod http;
pub mod provider;
pub mod session;
pub mod store;
pub mod transcript;

pub use config::Config;
pub use http::{create_router, AppState};
pub use provider::{
    AssemblyAiClient, JobStatus, PollConfig, ProviderError, TranscriptionBackend,
};
pub use session::{transcribe_payload, SessionError};
pub use store::TranscriptStore;
pub use transcript::{normalize, RawUtterance, Segment};
