//! HTTP surface of the relay:
//! - GET /ws - WebSocket upgrade; one audio frame in, one connection ID out
//! - GET /transcription/:id - Fetch a finished transcript
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
