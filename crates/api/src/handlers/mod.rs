pub mod dashboard;
pub mod metrics;
pub mod storage;

use fleetwatch_core::error::CoreError;
use fleetwatch_core::types::DbId;
use fleetwatch_db::repositories::ServerRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Fail with 404 unless a server with `server_id` is registered.
pub(crate) async fn ensure_server_exists(state: &AppState, server_id: DbId) -> AppResult<()> {
    ServerRepo::find_by_id(&state.pool, server_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Server",
            id: server_id,
        })?;
    Ok(())
}
