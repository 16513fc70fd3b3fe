//! Server registry models.

use fleetwatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `servers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Server {
    pub id: DbId,
    pub ip_address: String,
    pub hostname: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A server with aggregate counts over its full sample history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServerWithCounts {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub server: Server,
    pub total_metrics: i64,
    pub total_errors: i64,
    pub last_metric: Option<Timestamp>,
}
