//! Repository for the `storage_health` and `current_storage_health` tables.

use fleetwatch_core::ingest::NewStorageReport;
use fleetwatch_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::storage_report::{RecordedReport, StorageReport};
use crate::repositories::ServerRepo;

/// Column list for `storage_health` SELECT queries.
const COLUMNS: &str = "\
    id, server_id, recorded_at, \
    total_alerts, critical_alerts, warning_alerts, \
    critical_disk_mount, critical_disk_usage, disks_over_threshold, top_folders, \
    raid_status, smart_status, filesystem_status, network_status, \
    iowait_percent, summary, full_report";

/// Snapshot columns copied from `storage_health` into `current_storage_health`.
const SNAPSHOT_COLUMNS: &str = "\
    recorded_at, total_alerts, critical_alerts, warning_alerts, \
    critical_disk_mount, critical_disk_usage, disks_over_threshold, top_folders, \
    raid_status, smart_status, filesystem_status, network_status, \
    iowait_percent, summary, full_report";

/// Provides write and read operations for storage health reports.
pub struct StorageReportRepo;

impl StorageReportRepo {
    /// Record one report and refresh the server's current storage snapshot,
    /// in a single transaction.
    pub async fn record(
        pool: &PgPool,
        report: &NewStorageReport,
    ) -> Result<RecordedReport, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let server_id = ServerRepo::resolve_by_address(&mut *tx, &report.server_ip).await?;

        let recorded = sqlx::query_as::<_, RecordedReport>(
            "INSERT INTO storage_health ( \
                server_id, total_alerts, critical_alerts, warning_alerts, \
                critical_disk_mount, critical_disk_usage, disks_over_threshold, top_folders, \
                raid_status, smart_status, filesystem_status, network_status, \
                iowait_percent, summary, full_report) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING id, server_id, recorded_at",
        )
        .bind(server_id)
        .bind(report.total_alerts)
        .bind(report.critical_alerts)
        .bind(report.warning_alerts)
        .bind(&report.critical_disk_mount)
        .bind(report.critical_disk_usage)
        .bind(report.disks_over_threshold.as_ref().map(Json))
        .bind(&report.top_folders)
        .bind(report.raid_status)
        .bind(report.smart_status)
        .bind(report.filesystem_status)
        .bind(report.network_status)
        .bind(report.iowait_percent)
        .bind(&report.summary)
        .bind(&report.full_report)
        .fetch_one(&mut *tx)
        .await?;

        let upsert = format!(
            "INSERT INTO current_storage_health (server_id, report_id, {SNAPSHOT_COLUMNS}) \
             SELECT server_id, id, {SNAPSHOT_COLUMNS} FROM storage_health WHERE id = $1 \
             ON CONFLICT (server_id) DO UPDATE SET \
                report_id = EXCLUDED.report_id, \
                recorded_at = EXCLUDED.recorded_at, \
                total_alerts = EXCLUDED.total_alerts, \
                critical_alerts = EXCLUDED.critical_alerts, \
                warning_alerts = EXCLUDED.warning_alerts, \
                critical_disk_mount = EXCLUDED.critical_disk_mount, \
                critical_disk_usage = EXCLUDED.critical_disk_usage, \
                disks_over_threshold = EXCLUDED.disks_over_threshold, \
                top_folders = EXCLUDED.top_folders, \
                raid_status = EXCLUDED.raid_status, \
                smart_status = EXCLUDED.smart_status, \
                filesystem_status = EXCLUDED.filesystem_status, \
                network_status = EXCLUDED.network_status, \
                iowait_percent = EXCLUDED.iowait_percent, \
                summary = EXCLUDED.summary, \
                full_report = EXCLUDED.full_report \
             WHERE current_storage_health.recorded_at <= EXCLUDED.recorded_at"
        );
        sqlx::query(&upsert)
            .bind(recorded.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(recorded)
    }

    /// Most recent reports for a server, newest first.
    pub async fn list_for_server(
        pool: &PgPool,
        server_id: DbId,
        limit: i64,
    ) -> Result<Vec<StorageReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM storage_health \
             WHERE server_id = $1 \
             ORDER BY recorded_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, StorageReport>(&query)
            .bind(server_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
