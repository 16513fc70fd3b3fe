use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool is reference-counted, the config is
/// behind `Arc`). The pool is the only shared mutable resource.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fleetwatch_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
