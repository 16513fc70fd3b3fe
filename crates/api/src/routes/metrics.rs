//! Route definitions for health sample ingestion and listing.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::metrics;
use crate::state::AppState;

/// Routes mounted at `/metrics`.
///
/// ```text
/// POST /              -> record_sample
/// GET  /{server_id}   -> list_samples
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(metrics::record_sample))
        .route("/{server_id}", get(metrics::list_samples))
}
