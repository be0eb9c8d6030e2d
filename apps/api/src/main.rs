//! # Bazaar API Server
//!
//! Loads configuration from the environment, opens the SQLite database
//! (running migrations) and serves the JSON API until Ctrl+C / SIGTERM.

use tokio::net::TcpListener;
use tracing::info;

use bazaar_api::config::ApiConfig;
use bazaar_api::{app, init_tracing, AppState};
use bazaar_db::Database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Bazaar API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.http_port,
        db_path = %config.db_path.display(),
        "Configuration loaded"
    );

    // Connect to database (migrations run on connect)
    let db = Database::new(config.db_config()).await?;
    info!("Database ready");

    let router = app(AppState::new(db.clone()));

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Starting HTTP server");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
