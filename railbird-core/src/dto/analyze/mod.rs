//! Analyze request/response DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::job::Platform;

/// Request to start analyzing a video
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub stream_id: String,
    pub source_uri: String,
    pub segments: Vec<SegmentBounds>,
    pub platform: Platform,
    #[serde(default)]
    pub players: Option<Vec<String>>,
}

/// Time bounds of one requested segment, in seconds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SegmentBounds {
    pub start: f64,
    pub end: f64,
}

/// Response to a successful analyze request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub job_id: Uuid,
    pub message: String,
}
