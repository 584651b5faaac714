//! recipebox-server - Recipe sharing REST API
//!
//! Serves the in-memory recipe collection over HTTP. Authentication is
//! handled by an upstream layer that forwards the caller's identity.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use recipebox_common::config::{load_config, resolve_config_path};
use recipebox_common::seed::demo_collection;
use recipebox_common::{time, RecipeStore};
use recipebox_server::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for recipebox-server
#[derive(Parser, Debug)]
#[command(name = "recipebox-server")]
#[command(about = "Recipe sharing REST API")]
#[command(version)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long, env = "RECIPEBOX_PORT")]
    port: Option<u16>,

    /// Address to bind (overrides config)
    #[arg(long, env = "RECIPEBOX_BIND")]
    bind: Option<String>,

    /// Directory for uploaded images (overrides config)
    #[arg(long, env = "RECIPEBOX_UPLOADS_DIR")]
    uploads_dir: Option<PathBuf>,

    /// Load the sample recipes at startup
    #[arg(long)]
    seed: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info", env = "RECIPEBOX_LOG")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing before anything that logs
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "recipebox_server={level},recipebox_common={level},tower_http={level}",
                    level = args.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting recipebox-server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config_path = resolve_config_path(args.config.as_deref());
    let mut config = load_config(config_path.as_deref()).context("Failed to load configuration")?;

    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(dir) = args.uploads_dir {
        config.uploads_dir = dir;
    }
    config.seed_demo_data |= args.seed;

    let store = if config.seed_demo_data {
        let collection = demo_collection(time::now());
        info!("Seeded {} demo recipes", collection.len());
        RecipeStore::with_collection(collection)
    } else {
        RecipeStore::new()
    };

    tokio::fs::create_dir_all(&config.uploads_dir)
        .await
        .with_context(|| format!("Failed to create {}", config.uploads_dir.display()))?;
    info!("Uploads directory: {}", config.uploads_dir.display());

    let state = AppState::from_config(&config, store);
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.bind_addr, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.bind_addr, config.port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("recipebox-server listening on http://{}", addr);
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
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install signal handler: {}", e);
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
