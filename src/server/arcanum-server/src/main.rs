//! Arcanum Server - Main entry point.

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use arcanum_api::AppState;

#[derive(Parser)]
#[command(name = "arcanum-server")]
#[command(about = "Arcanum - key generation, encryption and hashing over HTTP")]
#[command(version)]
struct Cli {
    /// Server bind address
    #[arg(long, default_value = "127.0.0.1:5000", env = "ARCANUM_BIND_ADDRESS")]
    bind: SocketAddr,

    /// Allow cross-origin requests from any origin
    #[arg(long, env = "ARCANUM_CORS_PERMISSIVE")]
    cors_permissive: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("arcanum=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    tracing::info!("Starting Arcanum server...");

    let mut app = arcanum_api::router(AppState::new());
    if cli.cors_permissive {
        tracing::warn!("Permissive CORS enabled");
        app = app.layer(CorsLayer::permissive());
    }

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind))?;

    tracing::info!(address = %listener.local_addr()?, "Arcanum server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
