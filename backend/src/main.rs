//! HTTP JSON API over the fleet catalog and blog.

mod config;
mod handlers;
mod markdown;
mod models;
mod request_context;
mod routes;
mod state;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::ServerConfig::from_env()?;
    tracing::info!("Starting fleet backend server");

    let app_state = state::AppState::new(&config).await?;
    tracing::info!(
        "Loaded {} cars and {} blog posts",
        app_state.car_count(),
        app_state.post_count()
    );

    let app = routes::create_router(app_state);

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
