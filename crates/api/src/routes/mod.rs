pub mod dashboard;
pub mod health;
pub mod metrics;
pub mod storage;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /metrics                         record health sample (POST)
/// /metrics/{server_id}             raw samples, newest first (GET)
///
/// /storage                         record storage report (POST)
/// /storage/{server_id}             storage reports, newest first (GET)
///
/// /dashboard                       fleet snapshot (GET)
/// /dashboard/servers               servers with sample counts (GET)
/// /dashboard/history/{server_id}   sample history window (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/metrics", metrics::router())
        .nest("/storage", storage::router())
        .nest("/dashboard", dashboard::router())
}
