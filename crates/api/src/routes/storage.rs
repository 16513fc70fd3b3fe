//! Route definitions for storage report ingestion and listing.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::storage;
use crate::state::AppState;

/// Routes mounted at `/storage`.
///
/// ```text
/// POST /              -> record_report
/// GET  /{server_id}   -> list_reports
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(storage::record_report))
        .route("/{server_id}", get(storage::list_reports))
}
