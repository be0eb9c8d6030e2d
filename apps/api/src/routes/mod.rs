//! # HTTP Routes
//!
//! ```text
//! /api/v1
//! ├── GET    /health
//! ├── GET    /items                      list (page, per_page)
//! ├── POST   /items                      create
//! ├── GET    /items/find                 one match or {}
//! ├── GET    /items/find_all             every match
//! ├── GET    /items/{id}                 show
//! ├── PATCH  /items/{id}                 partial update (PUT alias)
//! ├── DELETE /items/{id}                 cascading delete
//! ├── GET    /items/{id}/merchant        owning merchant
//! ├── GET    /merchants                  list (page, per_page)
//! ├── POST   /merchants                  create
//! ├── GET    /merchants/find             one match or {}
//! ├── GET    /merchants/find_all         every match
//! ├── GET    /merchants/{id}             show
//! └── GET    /merchants/{id}/items       items of one merchant (page, per_page)
//! ```

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use crate::error::ApiError;
use crate::AppState;

pub mod items;
pub mod merchants;

/// Routes mounted under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .merge(items::router())
        .merge(merchants::router())
}

/// `OK` while the database answers, 503 otherwise.
async fn health_handler(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.db.health_check().await {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
    }
}

/// Reads an id from a path segment.
///
/// A segment that is not an integer can't name any row, so it is reported
/// the same way as an id that doesn't exist.
pub(crate) fn parse_id(entity: &str, raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::not_found(entity, raw))
}
