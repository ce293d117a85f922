//! Analysis Service
//!
//! Business logic for the analysis job lifecycle: request validation, job
//! creation, segment fan-out, status reads and the phase-1 completion
//! callback.

use railbird_core::domain::job::{
    AnalysisJob, AnalysisPhase, JobStatus, SegmentInfo, SegmentStatus,
};
use railbird_core::dto::analyze::{AnalyzeRequest, SegmentBounds};
use railbird_core::dto::callback::Phase1CompleteRequest;
use railbird_core::dto::status::JobStatusResponse;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dispatch::{DispatchError, Dispatcher};
use crate::repository::job_repository;

/// Service error type
#[derive(Debug)]
pub enum AnalysisError {
    NotFound(Uuid),
    ValidationError(String),
    DatabaseError(sqlx::Error),
    DispatchError(DispatchError),
}

impl From<sqlx::Error> for AnalysisError {
    fn from(err: sqlx::Error) -> Self {
        AnalysisError::DatabaseError(err)
    }
}

impl From<DispatchError> for AnalysisError {
    fn from(err: DispatchError) -> Self {
        AnalysisError::DispatchError(err)
    }
}

/// Validate an analyze request. Fail fast: nothing is persisted on rejection.
pub fn validate_request(req: &AnalyzeRequest) -> Result<(), AnalysisError> {
    if req.stream_id.is_empty() || req.source_uri.is_empty() {
        return Err(AnalysisError::ValidationError(
            "Missing required fields: streamId, sourceUri, segments, platform".to_string(),
        ));
    }

    if !req.source_uri.starts_with("gs://") {
        return Err(AnalysisError::ValidationError(
            "Invalid source URI format".to_string(),
        ));
    }

    if req.segments.is_empty() {
        return Err(AnalysisError::ValidationError(
            "At least one segment is required".to_string(),
        ));
    }

    for seg in &req.segments {
        if seg.start >= seg.end {
            return Err(AnalysisError::ValidationError(format!(
                "Segment start must be before end ({} >= {})",
                seg.start, seg.end
            )));
        }
    }

    Ok(())
}

/// Build the job's segment entries from the request, indexed by request order
pub fn build_segments(bounds: &[SegmentBounds]) -> Vec<SegmentInfo> {
    bounds
        .iter()
        .enumerate()
        .map(|(index, seg)| SegmentInfo {
            index: index as i32,
            start: seg.start,
            end: seg.end,
            status: SegmentStatus::Pending,
            hands_found: None,
            error_message: None,
            segment_uri: None,
        })
        .collect()
}

/// Create an analysis job and fan out one task per segment.
///
/// The job is persisted as `pending` before any task is enqueued, and only
/// moves to `analyzing` after every enqueue has succeeded. A failure partway
/// through leaves the job `pending` with some tasks enqueued; there is no
/// compensation, and callers observe the stall through the status endpoint.
pub async fn start_analysis(
    pool: &PgPool,
    dispatcher: &Dispatcher,
    req: AnalyzeRequest,
) -> Result<AnalysisJob, AnalysisError> {
    validate_request(&req)?;

    let job_id = Uuid::new_v4();
    let segments = build_segments(&req.segments);

    tracing::info!(
        "Creating job {} for stream {} ({} segments)",
        job_id,
        req.stream_id,
        segments.len()
    );

    let job = AnalysisJob {
        job_id,
        stream_id: req.stream_id,
        source_uri: req.source_uri,
        platform: req.platform,
        status: JobStatus::Pending,
        phase: AnalysisPhase::Phase1,
        total_segments: segments.len() as i32,
        completed_segments: 0,
        failed_segments: 0,
        hands_found: 0,
        phase1_completed_segments: 0,
        phase2_total_hands: 0,
        phase2_completed_hands: 0,
        segments,
        players: req.players,
        error_message: None,
        created_at: chrono::Utc::now(),
        started_at: None,
        completed_at: None,
    };

    job_repository::create(pool, &job).await?;

    dispatcher.dispatch_segments(&job).await?;

    job_repository::mark_analyzing(pool, job.job_id).await?;

    tracing::info!("All {} tasks enqueued for job {}", job.total_segments, job.job_id);

    Ok(job)
}

/// Read a job's status, mapped to the external contract. No side effects.
pub async fn job_status(pool: &PgPool, job_id: Uuid) -> Result<JobStatusResponse, AnalysisError> {
    let job = job_repository::find_by_id(pool, job_id)
        .await?
        .ok_or(AnalysisError::NotFound(job_id))?;

    Ok(JobStatusResponse::from_job(&job))
}

/// Handle the phase-1 completion callback: record phase progress and fan out
/// one phase-2 task per found hand. Returns the number of tasks created.
pub async fn complete_phase1(
    pool: &PgPool,
    dispatcher: &Dispatcher,
    req: Phase1CompleteRequest,
) -> Result<usize, AnalysisError> {
    let job = job_repository::find_by_id(pool, req.job_id)
        .await?
        .ok_or(AnalysisError::NotFound(req.job_id))?;

    tracing::info!(
        "Phase 1 complete for job {}: {} hands found",
        job.job_id,
        req.hands.len()
    );

    job_repository::begin_phase2(pool, job.job_id, req.hands.len() as i32).await?;

    let names = dispatcher.dispatch_hands(&req).await?;

    tracing::info!("All {} phase-2 tasks enqueued for job {}", names.len(), job.job_id);

    Ok(names.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use railbird_core::domain::job::Platform;

    fn valid_request() -> AnalyzeRequest {
        AnalyzeRequest {
            stream_id: "stream-1".to_string(),
            source_uri: "gs://bucket/video.mp4".to_string(),
            segments: vec![
                SegmentBounds { start: 0.0, end: 60.0 },
                SegmentBounds { start: 60.0, end: 120.0 },
                SegmentBounds { start: 120.0, end: 180.0 },
            ],
            platform: Platform::Ept,
            players: None,
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_request() {
        assert!(validate_request(&valid_request()).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let mut req = valid_request();
        req.stream_id = String::new();
        assert!(matches!(
            validate_request(&req),
            Err(AnalysisError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_object_storage_uri() {
        let mut req = valid_request();
        req.source_uri = "https://example.com/video.mp4".to_string();
        assert!(matches!(
            validate_request(&req),
            Err(AnalysisError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_segments() {
        let mut req = valid_request();
        req.segments.clear();
        assert!(matches!(
            validate_request(&req),
            Err(AnalysisError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_segment_bounds() {
        let mut req = valid_request();
        req.segments.push(SegmentBounds {
            start: 300.0,
            end: 240.0,
        });
        assert!(matches!(
            validate_request(&req),
            Err(AnalysisError::ValidationError(_))
        ));
    }

    #[test]
    fn test_build_segments_indexes_by_request_order() {
        let segments = build_segments(&valid_request().segments);
        assert_eq!(segments.len(), 3);
        for (i, seg) in segments.iter().enumerate() {
            assert_eq!(seg.index, i as i32);
            assert_eq!(seg.status, SegmentStatus::Pending);
            assert!(seg.hands_found.is_none());
        }
        assert_eq!(segments[2].start, 120.0);
        assert_eq!(segments[2].end, 180.0);
    }
}
