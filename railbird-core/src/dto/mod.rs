//! Data transfer objects
//!
//! Wire types for the orchestrator API and for the task payloads delivered to
//! the segment-analyzer workers. All of these serialize with camelCase field
//! names, which is the published contract.

pub mod analyze;
pub mod callback;
pub mod status;
pub mod task;
