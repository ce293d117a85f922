//! Analyze API Handler

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use railbird_core::dto::analyze::{AnalyzeRequest, AnalyzeResponse};

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::service::analysis_service;

/// POST /analyze
/// Validate the request, create the job, and fan out segment tasks
pub async fn start_analysis(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let Json(req) = payload?;

    tracing::info!("Analyze request for stream: {}", req.stream_id);

    let job = analysis_service::start_analysis(&state.pool, &state.dispatcher, req).await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        job_id: job.job_id,
        message: format!("Analysis started with {} segments", job.total_segments),
    }))
}
