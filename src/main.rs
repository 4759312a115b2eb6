use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use vox_relay::{create_router, AppState, AssemblyAiClient, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cfg = Config::load("config/vox-relay")?;
    cfg.validate()?;

    info!("vox-relay v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Polling every {}s, up to {} attempts per job",
        cfg.provider.poll.interval_secs, cfg.provider.poll.max_attempts
    );

    let backend = Arc::new(AssemblyAiClient::new(cfg.provider.api_key.clone())?);
    let state = AppState::new(backend, cfg.provider.poll.clone());

    let addr = format!("{}:{}", cfg.http.bind, cfg.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on {}", addr);

    axum::serve(listener, create_router(state))
        .await
        .context("HTTP server error")?;

    Ok(())
}
