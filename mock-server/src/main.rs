use anyhow::Context;
use clap::Parser;
use mock_server::{logging, router, AppState, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    logging::init_logging(config.log_format)?;

    if config.weather_api_key.trim().is_empty() {
        tracing::warn!("OPENWEATHER_API_KEY is not set; /weather requests will fail");
    }

    let state = AppState::from_config(&config).context("failed to build weather client")?;
    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    mock_server::run(listener, router(state), shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
