use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

mod config;
mod engine;
mod http;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("dermad starting");

    let config = config::Config::from_env();

    // Fail fast: no classifier, no service.
    let engine = engine::spawn_engine(&config.model_path, config.queue_depth)
        .context("failed to start analysis engine")?;

    let app = http::create_router(engine);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "dermad ready");
    axum::serve(listener, app).await?;

    Ok(())
}
