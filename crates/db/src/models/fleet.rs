//! Raw rows behind the fleet dashboard.
//!
//! These are read together inside one read-only transaction; the api layer
//! annotates them (online state, uptime strings, rollups).

use fleetwatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A server outer-joined with its current metrics and storage snapshots.
/// Snapshot columns are `None` when the server has no snapshot yet.
#[derive(Debug, Clone, FromRow)]
pub struct FleetServerRow {
    pub id: DbId,
    pub ip_address: String,
    pub hostname: String,
    pub status: String,
    pub description: Option<String>,
    pub last_update: Option<Timestamp>,
    pub cpu_usage: Option<f64>,
    pub memory_usage: Option<f64>,
    pub disk_usage: Option<f64>,
    pub load_average: Option<f64>,
    pub uptime: Option<i64>,
    pub network_rx: Option<i64>,
    pub network_tx: Option<i64>,
    pub is_error: Option<bool>,
    pub error_message: Option<String>,
    pub storage_last_update: Option<Timestamp>,
}

/// An error sample from the staleness window, with its server's identity.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentError {
    pub id: DbId,
    pub server_id: DbId,
    pub recorded_at: Timestamp,
    pub error_message: Option<String>,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
    pub ip_address: String,
    pub hostname: String,
}

/// A server's current storage snapshot, for the worst-first alert list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StorageAlert {
    pub server_id: DbId,
    pub ip_address: String,
    pub hostname: String,
    pub recorded_at: Timestamp,
    pub total_alerts: i32,
    pub critical_alerts: i32,
    pub warning_alerts: i32,
    pub critical_disk_mount: Option<String>,
    pub critical_disk_usage: Option<f64>,
    pub disks_over_threshold: Option<serde_json::Value>,
    pub top_folders: Option<serde_json::Value>,
    pub raid_status: bool,
    pub smart_status: bool,
    pub filesystem_status: bool,
    pub network_status: bool,
    pub iowait_percent: Option<f64>,
    pub summary: Option<String>,
}

/// Everything the dashboard needs, read as of one instant.
#[derive(Debug, Clone)]
pub struct FleetRows {
    /// The store's clock at the start of the read transaction.
    pub now: Timestamp,
    pub servers: Vec<FleetServerRow>,
    pub recent_errors: Vec<RecentError>,
    /// Error samples in the staleness window (not capped like `recent_errors`).
    pub errors_in_window: i64,
    pub storage_alerts: Vec<StorageAlert>,
}
