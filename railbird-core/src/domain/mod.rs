//! Core domain types
//!
//! These types represent the fundamental entities of a video analysis and are
//! shared between the orchestrator (for persistence and dispatch) and the
//! segment-analyzer workers (for reporting results back).

pub mod hand;
pub mod job;
