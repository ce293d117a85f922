//! Analysis job domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One end-to-end request to analyze a video for poker hands.
///
/// Persisted by the orchestrator; counters and segment entries are updated by
/// the segment-analyzer workers reporting back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisJob {
    pub job_id: Uuid,
    pub stream_id: String,
    pub source_uri: String,
    pub platform: Platform,
    pub status: JobStatus,
    pub phase: AnalysisPhase,
    pub total_segments: i32,
    pub completed_segments: i32,
    pub failed_segments: i32,
    pub hands_found: i32,
    pub phase1_completed_segments: i32,
    pub phase2_total_hands: i32,
    pub phase2_completed_hands: i32,
    pub segments: Vec<SegmentInfo>,
    pub players: Option<Vec<String>>,
    pub error_message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl AnalysisJob {
    /// Completion percentage in `[0, 100]`, rounded.
    ///
    /// A job with zero segments reports `0` rather than dividing by zero.
    pub fn progress(&self) -> u8 {
        if self.total_segments == 0 {
            return 0;
        }
        (self.completed_segments as f64 / self.total_segments as f64 * 100.0).round() as u8
    }
}

/// Job execution status
///
/// Forward-only: `pending -> analyzing -> completed | failed`. The orchestrator
/// moves a job to `analyzing` once all segment tasks are enqueued; terminal
/// transitions are made by the workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Analyzing,
    Completed,
    Failed,
}

/// Analysis phase
///
/// Phase 1 extracts hand timestamps per segment; phase 2 analyzes each
/// found hand in detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisPhase {
    Phase1,
    Phase2,
}

/// Tournament platform whose video layout conventions the analyzer expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ept,
    Triton,
    Wsop,
}

/// A time-bounded slice of the source video, analyzed independently.
///
/// Created `pending` as part of job creation. After dispatch the orchestrator
/// never mutates these entries; the worker owns them, addressed by `index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentInfo {
    pub index: i32,
    /// Offset into the source video, in seconds
    pub start: f64,
    pub end: f64,
    pub status: SegmentStatus,
    pub hands_found: Option<i32>,
    pub error_message: Option<String>,
    pub segment_uri: Option<String>,
}

/// Per-segment processing status, owned by the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}
