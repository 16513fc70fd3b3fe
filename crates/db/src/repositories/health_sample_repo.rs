//! Repository for the `health_metrics` and `current_metrics` tables.

use fleetwatch_core::ingest::NewHealthSample;
use fleetwatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::health_sample::{HealthSample, RecordedSample};
use crate::repositories::ServerRepo;

/// Column list for `health_metrics` SELECT queries.
const COLUMNS: &str = "\
    id, server_id, recorded_at, \
    cpu_usage, memory_usage, memory_total, memory_used, \
    disk_usage, disk_total, disk_used, \
    load_average, uptime, network_rx, network_tx, \
    processes_total, processes_running, \
    is_error, error_message, raw_data";

/// Snapshot columns copied from `health_metrics` into `current_metrics`.
const SNAPSHOT_COLUMNS: &str = "\
    recorded_at, cpu_usage, memory_usage, memory_total, memory_used, \
    disk_usage, disk_total, disk_used, load_average, uptime, \
    network_rx, network_tx, processes_total, processes_running, \
    is_error, error_message";

/// Provides write and read operations for health samples.
pub struct HealthSampleRepo;

impl HealthSampleRepo {
    /// Record one sample and refresh the server's current snapshot.
    ///
    /// Registry resolution, the append, and the snapshot upsert commit
    /// together or not at all. The snapshot is only replaced by a sample
    /// that is at least as recent as the one it holds.
    pub async fn record(
        pool: &PgPool,
        sample: &NewHealthSample,
    ) -> Result<RecordedSample, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let server_id = ServerRepo::resolve_by_address(&mut *tx, &sample.server_ip).await?;

        let recorded = sqlx::query_as::<_, RecordedSample>(
            "INSERT INTO health_metrics ( \
                server_id, cpu_usage, memory_usage, memory_total, memory_used, \
                disk_usage, disk_total, disk_used, load_average, uptime, \
                network_rx, network_tx, processes_total, processes_running, \
                is_error, error_message, raw_data) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING id, server_id, recorded_at",
        )
        .bind(server_id)
        .bind(sample.cpu_usage)
        .bind(sample.memory_usage)
        .bind(sample.memory_total)
        .bind(sample.memory_used)
        .bind(sample.disk_usage)
        .bind(sample.disk_total)
        .bind(sample.disk_used)
        .bind(sample.load_average)
        .bind(sample.uptime)
        .bind(sample.network_rx)
        .bind(sample.network_tx)
        .bind(sample.processes_total)
        .bind(sample.processes_running)
        .bind(sample.is_error)
        .bind(&sample.error_message)
        .bind(&sample.raw_data)
        .fetch_one(&mut *tx)
        .await?;

        let upsert = format!(
            "INSERT INTO current_metrics (server_id, sample_id, {SNAPSHOT_COLUMNS}) \
             SELECT server_id, id, {SNAPSHOT_COLUMNS} FROM health_metrics WHERE id = $1 \
             ON CONFLICT (server_id) DO UPDATE SET \
                sample_id = EXCLUDED.sample_id, \
                recorded_at = EXCLUDED.recorded_at, \
                cpu_usage = EXCLUDED.cpu_usage, \
                memory_usage = EXCLUDED.memory_usage, \
                memory_total = EXCLUDED.memory_total, \
                memory_used = EXCLUDED.memory_used, \
                disk_usage = EXCLUDED.disk_usage, \
                disk_total = EXCLUDED.disk_total, \
                disk_used = EXCLUDED.disk_used, \
                load_average = EXCLUDED.load_average, \
                uptime = EXCLUDED.uptime, \
                network_rx = EXCLUDED.network_rx, \
                network_tx = EXCLUDED.network_tx, \
                processes_total = EXCLUDED.processes_total, \
                processes_running = EXCLUDED.processes_running, \
                is_error = EXCLUDED.is_error, \
                error_message = EXCLUDED.error_message \
             WHERE current_metrics.recorded_at <= EXCLUDED.recorded_at"
        );
        sqlx::query(&upsert)
            .bind(recorded.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(recorded)
    }

    /// Samples for a server within the last `hours` hours, oldest first.
    ///
    /// The window is measured against the store's clock; `hours` is bound
    /// as a typed parameter.
    pub async fn history(
        pool: &PgPool,
        server_id: DbId,
        hours: i32,
    ) -> Result<Vec<HealthSample>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM health_metrics \
             WHERE server_id = $1 AND recorded_at > NOW() - make_interval(hours => $2) \
             ORDER BY recorded_at ASC, id ASC"
        );
        sqlx::query_as::<_, HealthSample>(&query)
            .bind(server_id)
            .bind(hours)
            .fetch_all(pool)
            .await
    }

    /// Raw samples for a server, newest first, paginated.
    pub async fn list_for_server(
        pool: &PgPool,
        server_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HealthSample>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM health_metrics \
             WHERE server_id = $1 \
             ORDER BY recorded_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, HealthSample>(&query)
            .bind(server_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
