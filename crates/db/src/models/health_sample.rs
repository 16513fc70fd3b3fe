//! Health sample models (append-only `health_metrics` table).

use fleetwatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One stored health sample.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HealthSample {
    pub id: DbId,
    pub server_id: DbId,
    pub recorded_at: Timestamp,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub memory_total: Option<i64>,
    pub memory_used: Option<i64>,
    pub disk_usage: f64,
    pub disk_total: Option<i64>,
    pub disk_used: Option<i64>,
    pub load_average: Option<f64>,
    pub uptime: Option<i64>,
    pub network_rx: Option<i64>,
    pub network_tx: Option<i64>,
    pub processes_total: Option<i32>,
    pub processes_running: Option<i32>,
    pub is_error: bool,
    pub error_message: Option<String>,
    pub raw_data: serde_json::Value,
}

/// Identifiers of a freshly recorded sample.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecordedSample {
    pub id: DbId,
    pub server_id: DbId,
    pub recorded_at: Timestamp,
}
