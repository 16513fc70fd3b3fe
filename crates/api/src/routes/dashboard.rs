//! Route definitions for the fleet dashboard.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /                        -> get_fleet_snapshot
/// GET /servers                 -> list_servers
/// GET /history/{server_id}     -> get_server_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::get_fleet_snapshot))
        .route("/servers", get(dashboard::list_servers))
        .route("/history/{server_id}", get(dashboard::get_server_history))
}
