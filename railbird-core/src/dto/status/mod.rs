//! Job status DTOs
//!
//! The status endpoint maps the internal status vocabulary to a stable
//! external one that polling clients depend on. The mapping is total: every
//! internal status has exactly one external counterpart.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::job::{AnalysisJob, JobStatus};

/// External job status vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExternalStatus {
    Pending,
    Executing,
    Success,
    Failure,
}

impl From<JobStatus> for ExternalStatus {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Pending => ExternalStatus::Pending,
            JobStatus::Analyzing => ExternalStatus::Executing,
            JobStatus::Completed => ExternalStatus::Success,
            JobStatus::Failed => ExternalStatus::Failure,
        }
    }
}

/// Aggregate counters reported alongside the status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMetadata {
    pub total_segments: i32,
    pub completed_segments: i32,
    pub hands_found: i32,
}

/// Response body of `GET /status/{job_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub id: Uuid,
    pub status: ExternalStatus,
    pub progress: u8,
    pub metadata: StatusMetadata,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobStatusResponse {
    /// Build the external status view of a job. Read-only, no side effects.
    pub fn from_job(job: &AnalysisJob) -> Self {
        Self {
            id: job.job_id,
            status: job.status.into(),
            progress: job.progress(),
            metadata: StatusMetadata {
                total_segments: job.total_segments,
                completed_segments: job.completed_segments,
                hands_found: job.hands_found,
            },
            created_at: job.created_at,
            completed_at: job.completed_at,
            error: job.error_message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_is_total() {
        assert_eq!(
            ExternalStatus::from(JobStatus::Pending),
            ExternalStatus::Pending
        );
        assert_eq!(
            ExternalStatus::from(JobStatus::Analyzing),
            ExternalStatus::Executing
        );
        assert_eq!(
            ExternalStatus::from(JobStatus::Completed),
            ExternalStatus::Success
        );
        assert_eq!(
            ExternalStatus::from(JobStatus::Failed),
            ExternalStatus::Failure
        );
    }

    #[test]
    fn test_external_status_wire_format() {
        assert_eq!(
            serde_json::to_value(ExternalStatus::Executing).unwrap(),
            serde_json::json!("EXECUTING")
        );
        assert_eq!(
            serde_json::to_value(ExternalStatus::Failure).unwrap(),
            serde_json::json!("FAILURE")
        );
    }

    #[test]
    fn test_error_field_omitted_when_absent() {
        use crate::domain::job::{AnalysisPhase, Platform};

        let job = AnalysisJob {
            job_id: Uuid::new_v4(),
            stream_id: "stream-1".to_string(),
            source_uri: "gs://bucket/video.mp4".to_string(),
            platform: Platform::Triton,
            status: JobStatus::Pending,
            phase: AnalysisPhase::Phase1,
            total_segments: 2,
            completed_segments: 0,
            failed_segments: 0,
            hands_found: 0,
            phase1_completed_segments: 0,
            phase2_total_hands: 0,
            phase2_completed_hands: 0,
            segments: Vec::new(),
            players: None,
            error_message: None,
            created_at: chrono::Utc::now(),
            started_at: None,
            completed_at: None,
        };

        let value = serde_json::to_value(JobStatusResponse::from_job(&job)).unwrap();
        assert!(value.get("error").is_none());
        assert_eq!(value["status"], serde_json::json!("PENDING"));
        assert_eq!(value["metadata"]["totalSegments"], serde_json::json!(2));
    }
}
