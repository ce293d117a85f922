//! Worker callback DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::hand::HandTimestamp;
use crate::domain::job::Platform;

/// Posted by the segment analyzer once phase 1 of a job has finished
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase1CompleteRequest {
    pub job_id: Uuid,
    pub stream_id: String,
    pub source_uri: String,
    pub platform: Platform,
    pub hands: Vec<HandTimestamp>,
}

/// Acknowledgement of a phase-1 completion callback
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase1CompleteResponse {
    pub success: bool,
    pub job_id: Uuid,
    pub phase2_tasks_created: usize,
}
