//! ombros — Standardized Precipitation Index drought monitoring API.

mod api;
mod clients;
mod config;
mod error;
mod logging;
mod pipeline;
mod state;

use std::net::SocketAddr;

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let settings = Settings::from_env()?;
    tracing::info!(
        host = %settings.host,
        port = settings.port,
        "starting ombros API server"
    );

    let state = AppState::from_settings(&settings).context("failed to build provider clients")?;
    let app = api::router(state);

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", settings.host, settings.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
