//! Read-side queries behind the fleet dashboard.

use fleetwatch_core::monitoring::staleness::window_start;
use fleetwatch_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::fleet::{FleetRows, FleetServerRow, RecentError, StorageAlert};

/// Maximum number of error samples returned in `recent_errors`.
pub const RECENT_ERROR_LIMIT: i64 = 50;

/// Provides the consistent multi-query dashboard read.
pub struct FleetRepo;

impl FleetRepo {
    /// Read every dashboard input as of a single instant.
    ///
    /// All queries share one REPEATABLE READ snapshot, and "now" is the
    /// store's clock inside that snapshot, so the server list, the error
    /// feed and the counts can never disagree with each other.
    pub async fn snapshot(pool: &PgPool) -> Result<FleetRows, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let now: Timestamp = sqlx::query_scalar("SELECT NOW()")
            .fetch_one(&mut *tx)
            .await?;
        let cutoff = window_start(now);

        let servers = sqlx::query_as::<_, FleetServerRow>(
            "SELECT \
                s.id, s.ip_address, s.hostname, s.status, s.description, \
                cm.recorded_at AS last_update, \
                cm.cpu_usage, cm.memory_usage, cm.disk_usage, \
                cm.load_average, cm.uptime, cm.network_rx, cm.network_tx, \
                cm.is_error, cm.error_message, \
                cs.recorded_at AS storage_last_update \
             FROM servers s \
             LEFT JOIN current_metrics cm ON cm.server_id = s.id \
             LEFT JOIN current_storage_health cs ON cs.server_id = s.id \
             ORDER BY s.ip_address",
        )
        .fetch_all(&mut *tx)
        .await?;

        let recent_errors = sqlx::query_as::<_, RecentError>(
            "SELECT \
                hm.id, hm.server_id, hm.recorded_at, hm.error_message, \
                hm.cpu_usage, hm.memory_usage, hm.disk_usage, \
                s.ip_address, s.hostname \
             FROM health_metrics hm \
             JOIN servers s ON s.id = hm.server_id \
             WHERE hm.is_error AND hm.recorded_at > $1 \
             ORDER BY hm.recorded_at DESC, hm.id DESC \
             LIMIT $2",
        )
        .bind(cutoff)
        .bind(RECENT_ERROR_LIMIT)
        .fetch_all(&mut *tx)
        .await?;

        let errors_in_window: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM health_metrics WHERE is_error AND recorded_at > $1",
        )
        .bind(cutoff)
        .fetch_one(&mut *tx)
        .await?;

        let storage_alerts = sqlx::query_as::<_, StorageAlert>(
            "SELECT \
                cs.server_id, s.ip_address, s.hostname, cs.recorded_at, \
                cs.total_alerts, cs.critical_alerts, cs.warning_alerts, \
                cs.critical_disk_mount, cs.critical_disk_usage, \
                cs.disks_over_threshold, cs.top_folders, \
                cs.raid_status, cs.smart_status, cs.filesystem_status, cs.network_status, \
                cs.iowait_percent, cs.summary \
             FROM current_storage_health cs \
             JOIN servers s ON s.id = cs.server_id \
             ORDER BY cs.critical_alerts DESC, cs.total_alerts DESC, s.ip_address",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(FleetRows {
            now,
            servers,
            recent_errors,
            errors_in_window,
            storage_alerts,
        })
    }
}
