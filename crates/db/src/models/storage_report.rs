//! Storage health report models (append-only `storage_health` table).

use fleetwatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One stored storage health report.
///
/// The structured columns are returned as stored; `disks_over_threshold`
/// holds an array of `{mount, device, usage_percent, size, used, free}`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StorageReport {
    pub id: DbId,
    pub server_id: DbId,
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
    pub full_report: Option<serde_json::Value>,
}

/// Identifiers of a freshly recorded storage report.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecordedReport {
    pub id: DbId,
    pub server_id: DbId,
    pub recorded_at: Timestamp,
}
