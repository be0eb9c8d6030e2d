//! # Bazaar API
//!
//! JSON HTTP API over the Bazaar item/merchant catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Bazaar API Server                              │
//! │                                                                         │
//! │  Client ───► HTTP (3000) ───► /api/v1 routes ───► bazaar-db ───► SQLite │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                          bazaar-core validation                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The router is exposed as a library so tests can drive it in-process.

use axum::Router;
use tracing_subscriber::EnvFilter;

use bazaar_db::Database;

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::router())
        .with_state(state)
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bazaar=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
