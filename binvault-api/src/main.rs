//! BinVault lookup service - main entry point
//!
//! Authenticated site→bins lookup microservice: token-protected admin API
//! over a whole-file JSON record store, with a bounded rolling event log
//! for daily usage statistics.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use binvault_api::config::Config;
use binvault_api::events::EventLog;
use binvault_api::service::QueryService;
use binvault_api::session::SessionStore;
use binvault_api::store::RecordStore;
use binvault_api::{build_router, AppState};

/// Command-line arguments for binvault-api
#[derive(Parser, Debug)]
#[command(name = "binvault-api")]
#[command(about = "Authenticated site-to-bin lookup service")]
#[command(version)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "binvault.toml", env = "BINVAULT_CONFIG")]
    config: PathBuf,

    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "BINVAULT_PORT")]
    port: Option<u16>,

    /// Directory holding the persisted store and event log
    #[arg(long, env = "BINVAULT_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "binvault_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting BinVault lookup service v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::resolve(&args.config, args.port, args.data_dir)
        .context("Failed to load configuration")?;

    tokio::fs::create_dir_all(&config.data_dir)
        .await
        .with_context(|| format!("Failed to create data dir {}", config.data_dir.display()))?;

    // Corruption of either persisted artifact is fatal here, before the
    // server accepts any request
    let store = RecordStore::open(config.sites_path())
        .await
        .context("Failed to open record store")?;
    let events = EventLog::open(config.stats_path())
        .await
        .context("Failed to open event log")?;

    let service = Arc::new(QueryService::new(Arc::new(store), Arc::new(events)));
    let state = AppState::new(service, Arc::new(SessionStore::new()), config.admin.clone());
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

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
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
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
