//! Vixio Cue Engine (vixio-ce) - Main entry point
//!
//! Accepts cue triggers, keeps them ordered by priority and arrival, tracks
//! the show playhead, and serves the ordered queue to executors over HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vixio_ce::collaborators::HttpSchemaValidator;
use vixio_ce::config::{Config, ConfigOverrides, ConfigSource};
use vixio_ce::{build_router, AppState};

/// Command-line arguments for vixio-ce
#[derive(Parser, Debug)]
#[command(name = "vixio-ce")]
#[command(about = "Cue scheduling and playhead sync service for Vixio")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long, env = "VIXIO_CE_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "VIXIO_CE_PORT")]
    port: Option<u16>,

    /// Interface to bind to
    #[arg(short, long, env = "VIXIO_CE_BIND")]
    bind: Option<String>,

    /// Base URL of the payload validation service
    #[arg(long, env = "VIXIO_VALIDATION_URL")]
    validation_url: Option<String>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        Self {
            config_path: args.config,
            port: args.port,
            bind_address: args.bind,
            validation_url: args.validation_url,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing so the configured level applies from the first line
    let config = Config::load(args.into()).context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification immediately after tracing init
    info!(
        "Starting Vixio Cue Engine (vixio-ce) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &config.source {
        ConfigSource::File(path) => info!("Configuration: {}", path.display()),
        ConfigSource::Defaults(path) => warn!(
            "Config file {} not found, using built-in defaults",
            path.display()
        ),
    }

    let mut state = AppState::new();
    if let Some(url) = &config.validation_url {
        let validator = HttpSchemaValidator::new(url, config.validation_timeout)
            .context("Failed to create validation service client")?;
        info!("Trigger payloads validated by {}", validator.base_url());
        state = state.with_validator(Arc::new(validator));
    } else {
        info!("No validation service configured; payloads accepted as-is");
    }

    let app = build_router(state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("vixio-ce listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
