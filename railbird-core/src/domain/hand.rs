//! Hand timestamp types

use serde::{Deserialize, Serialize};

/// A hand located by phase-1 analysis.
///
/// `start`/`end` are clock timestamps (`MM:SS` or `HH:MM:SS`) within the
/// analyzed segment, exactly as the analyzer reports them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandTimestamp {
    pub hand_number: i64,
    pub start: String,
    pub end: String,
}
