//! Task payloads delivered to the segment analyzer through the task queue

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::hand::HandTimestamp;
use crate::domain::job::Platform;
use crate::dto::analyze::SegmentBounds;

/// Phase-1 work unit: analyze one segment of the source video
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSegmentRequest {
    pub job_id: Uuid,
    pub stream_id: String,
    pub segment_index: i32,
    pub source_uri: String,
    pub segment: SegmentBounds,
    pub platform: Platform,
}

/// Phase-2 work unit: analyze one hand located by phase 1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessHandRequest {
    pub job_id: Uuid,
    pub stream_id: String,
    pub hand_index: i64,
    pub source_uri: String,
    pub hand_timestamp: HandTimestamp,
    pub platform: Platform,
}
