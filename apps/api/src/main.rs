//! # Stayline API
//!
//! REST server exposing the availability engine, revenue KPIs, and the
//! booking/maintenance write paths.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stayline API Server                              │
//! │                                                                         │
//! │  Caller ───► REST (8080) ───► Handlers ───► stayline-db ───► SQLite    │
//! │                                                  ▲                      │
//! │                            stayline-recon ───────┘                      │
//! │                            (background status loop)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod routes;

use std::net::SocketAddr;
use std::time::Duration;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use stayline_db::{Database, DbConfig};
use stayline_recon::{ReconConfig, StatusReconciler};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    info!("Starting Stayline API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.http_port,
        database_path = %config.database_path,
        "Configuration loaded"
    );

    // Connect to the database (runs migrations)
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Connected to SQLite");

    // Spawn the status reconciliation loop
    let recon_config = ReconConfig::default()
        .interval(Duration::from_secs(config.recon_interval_secs))
        .cycle_timeout(Duration::from_secs(config.recon_cycle_timeout_secs));
    let (reconciler, recon_handle) = StatusReconciler::new(db.clone(), recon_config);
    tokio::spawn(reconciler.run());
    info!(
        interval_secs = config.recon_interval_secs,
        "Status reconciler spawned"
    );

    // Build the router
    let state = AppState { db: db.clone() };
    let app = routes::router(state);

    // Start the server
    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop the reconciler after the last request drains
    if let Err(e) = recon_handle.shutdown().await {
        tracing::warn!(?e, "Reconciler was already stopped");
    }
    db.close().await;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::error!("Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(?e, "Failed to install signal handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
