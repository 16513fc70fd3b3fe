//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the handlers via `fleetwatch_core::paging`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Look-back window for history queries (`?hours=`).
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub hours: Option<i32>,
}
