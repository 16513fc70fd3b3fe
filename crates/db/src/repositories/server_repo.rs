//! Repository for the `servers` table.

use fleetwatch_core::ingest::default_hostname;
use fleetwatch_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::server::{Server, ServerWithCounts};

/// Column list for `servers` queries.
const COLUMNS: &str = "id, ip_address, hostname, description, status, created_at, updated_at";

/// Provides registry operations for servers.
pub struct ServerRepo;

impl ServerRepo {
    /// Return the id of the server with `address`, creating it on first sight.
    ///
    /// Runs on the caller's connection so it joins the caller's transaction.
    /// Two statements rather than one CTE: when a concurrent writer inserts
    /// the same address first, `DO NOTHING` waits for it to commit, and only
    /// a fresh statement snapshot can see the committed row. The unique
    /// constraint `uq_servers_ip_address` guarantees one row per address.
    pub async fn resolve_by_address(
        conn: &mut PgConnection,
        address: &str,
    ) -> Result<DbId, sqlx::Error> {
        let inserted: Option<DbId> = sqlx::query_scalar(
            "INSERT INTO servers (ip_address, hostname) VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_servers_ip_address DO NOTHING \
             RETURNING id",
        )
        .bind(address)
        .bind(default_hostname(address))
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(id) = inserted {
            tracing::info!(server_id = id, address, "Registered new server");
            return Ok(id);
        }

        sqlx::query_scalar("SELECT id FROM servers WHERE ip_address = $1")
            .bind(address)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a server by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Server>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM servers WHERE id = $1");
        sqlx::query_as::<_, Server>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every server with sample counts, ordered by address.
    pub async fn list_with_counts(pool: &PgPool) -> Result<Vec<ServerWithCounts>, sqlx::Error> {
        // GROUP BY the primary key lets every servers column be selected.
        let query = "\
            SELECT \
                s.id, s.ip_address, s.hostname, s.description, s.status, \
                s.created_at, s.updated_at, \
                COUNT(hm.id) AS total_metrics, \
                COUNT(hm.id) FILTER (WHERE hm.is_error) AS total_errors, \
                MAX(hm.recorded_at) AS last_metric \
            FROM servers s \
            LEFT JOIN health_metrics hm ON hm.server_id = s.id \
            GROUP BY s.id \
            ORDER BY s.ip_address";
        sqlx::query_as::<_, ServerWithCounts>(query)
            .fetch_all(pool)
            .await
    }
}
