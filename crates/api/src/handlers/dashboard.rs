//! Handlers for the fleet dashboard.
//!
//! The repository reads raw rows as of one instant; this module annotates
//! them (online state, warnings, uptime strings) and computes the fleet
//! rollups against that same instant.

use axum::extract::{Path, Query, State};
use axum::Json;
use fleetwatch_core::monitoring::performance::{has_warnings, FleetPerformance, Utilization};
use fleetwatch_core::monitoring::staleness::{counts_as_online, is_online};
use fleetwatch_core::monitoring::uptime::format_uptime;
use fleetwatch_core::types::{DbId, Percent, Timestamp};
use fleetwatch_db::models::fleet::{FleetRows, FleetServerRow, RecentError, StorageAlert};
use fleetwatch_db::models::health_sample::HealthSample;
use fleetwatch_db::models::server::ServerWithCounts;
use fleetwatch_db::repositories::{FleetRepo, HealthSampleRepo, ServerRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_server_exists;
use crate::query::HistoryParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default look-back for the history endpoint.
pub const DEFAULT_HISTORY_HOURS: i32 = 24;

/// Longest accepted look-back for the history endpoint (one week).
pub const MAX_HISTORY_HOURS: i32 = 168;

/// Shown for a server that has never reported metrics.
pub const NO_DATA_MESSAGE: &str = "Sem dados recentes";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One entry of the fleet list.
#[derive(Debug, Clone, Serialize)]
pub struct ServerStatus {
    pub id: DbId,
    pub ip_address: String,
    pub hostname: String,
    pub status: String,
    pub description: Option<String>,
    /// When the current metrics snapshot was recorded.
    pub last_update: Option<Timestamp>,
    pub cpu_usage: Option<Percent>,
    pub memory_usage: Option<Percent>,
    pub disk_usage: Option<Percent>,
    pub load_average: Option<f64>,
    pub uptime: Option<i64>,
    pub uptime_formatted: Option<String>,
    pub network_rx: Option<i64>,
    pub network_tx: Option<i64>,
    /// When the current storage snapshot was recorded.
    pub storage_last_update: Option<Timestamp>,
    pub is_online: bool,
    pub has_warnings: bool,
    pub is_error: bool,
    pub error_message: Option<String>,
}

/// Fleet-wide counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetStats {
    pub total_servers: usize,
    pub servers_online: usize,
    /// Error samples inside the staleness window.
    pub errors_last_hour: i64,
}

/// The full dashboard payload.
#[derive(Debug, Clone, Serialize)]
pub struct FleetSnapshot {
    pub servers: Vec<ServerStatus>,
    pub recent_errors: Vec<RecentError>,
    pub storage_alerts: Vec<StorageAlert>,
    pub stats: FleetStats,
    pub performance: Option<FleetPerformance>,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

fn utilization(row: &FleetServerRow) -> Option<Utilization> {
    Some(Utilization {
        cpu_usage: row.cpu_usage?,
        memory_usage: row.memory_usage?,
        disk_usage: row.disk_usage?,
    })
}

fn annotate(now: Timestamp, row: FleetServerRow) -> ServerStatus {
    let online = is_online(now, row.last_update);
    let warnings = has_warnings(online, utilization(&row));
    let (is_error, error_message) = match row.is_error {
        None => (true, Some(NO_DATA_MESSAGE.to_string())),
        Some(flag) => (flag, row.error_message),
    };

    ServerStatus {
        id: row.id,
        ip_address: row.ip_address,
        hostname: row.hostname,
        status: row.status,
        description: row.description,
        last_update: row.last_update,
        cpu_usage: row.cpu_usage,
        memory_usage: row.memory_usage,
        disk_usage: row.disk_usage,
        load_average: row.load_average,
        uptime: row.uptime,
        uptime_formatted: row.uptime.map(format_uptime),
        network_rx: row.network_rx,
        network_tx: row.network_tx,
        storage_last_update: row.storage_last_update,
        is_online: online,
        has_warnings: warnings,
        is_error,
        error_message,
    }
}

/// Build the dashboard payload from rows read at `rows.now`.
///
/// `servers_online` counts a server with either a fresh metrics or a fresh
/// storage snapshot, while `performance` only averages fresh metrics.
pub fn assemble_snapshot(rows: FleetRows) -> FleetSnapshot {
    let now = rows.now;

    let servers_online = rows
        .servers
        .iter()
        .filter(|row| counts_as_online(now, row.last_update, row.storage_last_update))
        .count();

    let performance = FleetPerformance::from_snapshots(
        rows.servers
            .iter()
            .filter(|row| is_online(now, row.last_update))
            .filter_map(utilization),
    );

    let stats = FleetStats {
        total_servers: rows.servers.len(),
        servers_online,
        errors_last_hour: rows.errors_in_window,
    };

    let servers = rows
        .servers
        .into_iter()
        .map(|row| annotate(now, row))
        .collect();

    FleetSnapshot {
        servers,
        recent_errors: rows.recent_errors,
        storage_alerts: rows.storage_alerts,
        stats,
        performance,
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard
pub async fn get_fleet_snapshot(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<FleetSnapshot>>> {
    let rows = FleetRepo::snapshot(&state.pool).await?;
    let snapshot = assemble_snapshot(rows);
    Ok(Json(DataResponse { data: snapshot }))
}

/// GET /api/v1/dashboard/servers
pub async fn list_servers(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ServerWithCounts>>>> {
    let servers = ServerRepo::list_with_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: servers }))
}

/// GET /api/v1/dashboard/history/{server_id}?hours=
///
/// Samples from the last `hours` hours (default 24, at most 168), oldest first.
pub async fn get_server_history(
    State(state): State<AppState>,
    Path(server_id): Path<DbId>,
    Query(params): Query<HistoryParams>,
) -> AppResult<Json<DataResponse<Vec<HealthSample>>>> {
    let hours = params.hours.unwrap_or(DEFAULT_HISTORY_HOURS);
    if !(1..=MAX_HISTORY_HOURS).contains(&hours) {
        return Err(AppError::BadRequest(format!(
            "hours must be between 1 and {MAX_HISTORY_HOURS}"
        )));
    }

    ensure_server_exists(&state, server_id).await?;

    let samples = HealthSampleRepo::history(&state.pool, server_id, hours).await?;
    Ok(Json(DataResponse { data: samples }))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn bare_server(id: DbId, ip: &str) -> FleetServerRow {
        FleetServerRow {
            id,
            ip_address: ip.to_string(),
            hostname: format!("server-{id}"),
            status: "active".to_string(),
            description: None,
            last_update: None,
            cpu_usage: None,
            memory_usage: None,
            disk_usage: None,
            load_average: None,
            uptime: None,
            network_rx: None,
            network_tx: None,
            is_error: None,
            error_message: None,
            storage_last_update: None,
        }
    }

    fn reporting_server(
        id: DbId,
        ip: &str,
        age: Duration,
        cpu: f64,
        mem: f64,
        disk: f64,
    ) -> FleetServerRow {
        FleetServerRow {
            last_update: Some(now() - age),
            cpu_usage: Some(cpu),
            memory_usage: Some(mem),
            disk_usage: Some(disk),
            uptime: Some(15_120),
            is_error: Some(false),
            ..bare_server(id, ip)
        }
    }

    fn rows(servers: Vec<FleetServerRow>) -> FleetRows {
        FleetRows {
            now: now(),
            servers,
            recent_errors: Vec::new(),
            errors_in_window: 0,
            storage_alerts: Vec::new(),
        }
    }

    #[test]
    fn empty_fleet_has_zero_stats_and_no_performance() {
        let snapshot = assemble_snapshot(rows(Vec::new()));
        assert_eq!(
            snapshot.stats,
            FleetStats {
                total_servers: 0,
                servers_online: 0,
                errors_last_hour: 0
            }
        );
        assert!(snapshot.servers.is_empty());
        assert!(snapshot.performance.is_none());
    }

    #[test]
    fn server_without_snapshot_reports_no_data() {
        let snapshot = assemble_snapshot(rows(vec![bare_server(1, "10.0.0.1")]));
        let server = &snapshot.servers[0];
        assert!(!server.is_online);
        assert!(!server.has_warnings);
        assert!(server.is_error);
        assert_eq!(server.error_message.as_deref(), Some(NO_DATA_MESSAGE));
        assert_eq!(server.uptime_formatted, None);
    }

    #[test]
    fn fresh_server_is_online_with_formatted_uptime() {
        let snapshot = assemble_snapshot(rows(vec![reporting_server(
            1,
            "10.0.0.1",
            Duration::hours(1),
            20.0,
            30.0,
            40.0,
        )]));
        let server = &snapshot.servers[0];
        assert!(server.is_online);
        assert!(!server.is_error);
        assert!(!server.has_warnings);
        assert_eq!(server.uptime_formatted.as_deref(), Some("4h 12m"));
        assert_eq!(snapshot.stats.servers_online, 1);
    }

    #[test]
    fn stale_server_never_warns() {
        let snapshot = assemble_snapshot(rows(vec![reporting_server(
            1,
            "10.0.0.1",
            Duration::hours(26),
            99.0,
            99.0,
            99.0,
        )]));
        let server = &snapshot.servers[0];
        assert!(!server.is_online);
        assert!(!server.has_warnings);
        assert_eq!(snapshot.stats.servers_online, 0);
        assert!(snapshot.performance.is_none());
    }

    #[test]
    fn storage_only_server_counts_online_but_not_in_performance() {
        let storage_only = FleetServerRow {
            storage_last_update: Some(now() - Duration::hours(2)),
            ..bare_server(2, "10.0.0.2")
        };
        let snapshot = assemble_snapshot(rows(vec![
            reporting_server(1, "10.0.0.1", Duration::minutes(5), 10.0, 20.0, 30.0),
            storage_only,
        ]));

        assert_eq!(snapshot.stats.total_servers, 2);
        assert_eq!(snapshot.stats.servers_online, 2);
        assert!(!snapshot.servers[1].is_online);

        let performance = snapshot.performance.expect("one fresh metrics snapshot");
        assert_eq!(performance.servers_sampled, 1);
        assert_eq!(performance.avg_cpu_usage, 10.0);
    }

    #[test]
    fn performance_averages_only_fresh_metrics() {
        let snapshot = assemble_snapshot(rows(vec![
            reporting_server(1, "10.0.0.1", Duration::hours(1), 10.0, 50.0, 40.0),
            reporting_server(2, "10.0.0.2", Duration::hours(2), 30.0, 50.0, 60.0),
            reporting_server(3, "10.0.0.3", Duration::hours(30), 90.0, 90.0, 90.0),
        ]));

        let performance = snapshot.performance.expect("fresh servers present");
        assert_eq!(performance.servers_sampled, 2);
        assert_eq!(performance.avg_cpu_usage, 20.0);
        assert_eq!(performance.avg_memory_usage, 50.0);
        assert_eq!(performance.avg_disk_usage, 50.0);
        assert_eq!(performance.health_score, 60.0);
    }

    #[test]
    fn warning_flag_uses_eighty_percent() {
        let snapshot = assemble_snapshot(rows(vec![reporting_server(
            1,
            "10.0.0.1",
            Duration::hours(1),
            20.0,
            81.0,
            40.0,
        )]));
        assert!(snapshot.servers[0].has_warnings);
        assert!(!snapshot.servers[0].is_error);
    }
}
