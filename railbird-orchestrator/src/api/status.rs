//! Status API Handler

use axum::{
    Json,
    extract::{Path, State},
};
use railbird_core::dto::status::JobStatusResponse;
use uuid::Uuid;

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::service::analysis_service;

/// GET /status/{job_id}
/// Read-only view of a job, mapped to the external status contract
pub async fn get_status(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> ApiResult<Json<JobStatusResponse>> {
    tracing::debug!("Status request for job: {}", job_id);

    let status = analysis_service::job_status(&state.pool, job_id).await?;

    Ok(Json(status))
}
