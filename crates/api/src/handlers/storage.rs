//! Handlers for storage health report ingestion and listing.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fleetwatch_core::ingest::prepare_storage_report;
use fleetwatch_core::paging::{clamp_limit, DEFAULT_STORAGE_LIMIT, MAX_STORAGE_LIMIT};
use fleetwatch_core::types::DbId;
use fleetwatch_db::models::storage_report::{RecordedReport, StorageReport};
use fleetwatch_db::repositories::StorageReportRepo;

use crate::error::AppResult;
use crate::handlers::ensure_server_exists;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/storage
pub async fn record_report(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<RecordedReport>>)> {
    let Json(payload) = payload?;
    let report = prepare_storage_report(payload).inspect_err(|err| {
        tracing::debug!(error = %err, "Rejected storage report");
    })?;

    let recorded = StorageReportRepo::record(&state.pool, &report).await?;

    tracing::info!(
        server_id = recorded.server_id,
        report_id = recorded.id,
        critical_alerts = report.critical_alerts,
        "Recorded storage report"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: recorded })))
}

/// GET /api/v1/storage/{server_id}?limit=
///
/// `offset` is accepted but ignored; storage listings are a single page.
pub async fn list_reports(
    State(state): State<AppState>,
    Path(server_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<StorageReport>>>> {
    ensure_server_exists(&state, server_id).await?;

    let limit = clamp_limit(params.limit, DEFAULT_STORAGE_LIMIT, MAX_STORAGE_LIMIT);
    let reports = StorageReportRepo::list_for_server(&state.pool, server_id, limit).await?;
    Ok(Json(DataResponse { data: reports }))
}
