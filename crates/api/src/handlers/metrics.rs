//! Handlers for health sample ingestion and raw sample listing.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fleetwatch_core::ingest::prepare_health_sample;
use fleetwatch_core::paging::{clamp_limit, clamp_offset, DEFAULT_SAMPLE_LIMIT, MAX_SAMPLE_LIMIT};
use fleetwatch_core::types::DbId;
use fleetwatch_db::models::health_sample::{HealthSample, RecordedSample};
use fleetwatch_db::repositories::HealthSampleRepo;

use crate::error::AppResult;
use crate::handlers::ensure_server_exists;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/metrics
///
/// Validate one health sample, classify it, and record it together with the
/// server's current snapshot. The body is kept verbatim as `raw_data`.
pub async fn record_sample(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<RecordedSample>>)> {
    let Json(payload) = payload?;
    let sample = prepare_health_sample(payload).inspect_err(|err| {
        tracing::debug!(error = %err, "Rejected health sample");
    })?;

    let recorded = HealthSampleRepo::record(&state.pool, &sample).await?;

    tracing::info!(
        server_id = recorded.server_id,
        sample_id = recorded.id,
        is_error = sample.is_error,
        "Recorded health sample"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: recorded })))
}

/// GET /api/v1/metrics/{server_id}?limit=&offset=
pub async fn list_samples(
    State(state): State<AppState>,
    Path(server_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<HealthSample>>>> {
    ensure_server_exists(&state, server_id).await?;

    let limit = clamp_limit(params.limit, DEFAULT_SAMPLE_LIMIT, MAX_SAMPLE_LIMIT);
    let offset = clamp_offset(params.offset);

    let samples = HealthSampleRepo::list_for_server(&state.pool, server_id, limit, offset).await?;
    Ok(Json(DataResponse { data: samples }))
}
