//! matprice-ui - Material price comparison web UI
//!
//! Records price quotes for sheet materials, derives area and unit prices,
//! and keeps them in a local CSV file.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matprice_common::config::ConfigResolver;
use matprice_common::RecordStore;
use matprice_ui::{build_router, AppState};

/// Command-line arguments for matprice-ui
#[derive(Parser, Debug)]
#[command(name = "matprice-ui")]
#[command(about = "Material price comparison UI")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "MATPRICE_PORT")]
    port: Option<u16>,

    /// CSV file holding the material records
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// TOML config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ConfigResolver::new()
        .with_data_file(args.data_file)
        .with_port(args.port)
        .with_config_file(args.config)
        .resolve();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting matprice-ui v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Some(warning) = &config.config_warning {
        warn!("{} (using defaults)", warning);
    }

    info!(
        "Data file: {} (from {})",
        config.data_file.display(),
        config.data_file_source
    );

    let store = RecordStore::new(config.data_file.clone());
    let existing = store
        .load()
        .with_context(|| format!("Failed to read {}", config.data_file.display()))?;
    info!("✓ Loaded {} material records", existing.len());

    let app = build_router(AppState::new(store));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("matprice-ui listening on http://{}", addr);

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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
