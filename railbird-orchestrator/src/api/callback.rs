//! Worker Callback API Handlers

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use railbird_core::dto::callback::{Phase1CompleteRequest, Phase1CompleteResponse};

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::service::analysis_service;

/// POST /phase1-complete
/// Segment analyzer reports phase-1 completion; fan out phase-2 hand tasks
pub async fn phase1_complete(
    State(state): State<AppState>,
    payload: Result<Json<Phase1CompleteRequest>, JsonRejection>,
) -> ApiResult<Json<Phase1CompleteResponse>> {
    let Json(req) = payload?;

    tracing::info!("Phase 1 complete callback for job: {}", req.job_id);

    let job_id = req.job_id;
    let tasks_created =
        analysis_service::complete_phase1(&state.pool, &state.dispatcher, req).await?;

    Ok(Json(Phase1CompleteResponse {
        success: true,
        job_id,
        phase2_tasks_created: tasks_created,
    }))
}
