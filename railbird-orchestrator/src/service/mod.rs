//! Service Module
//!
//! Business logic layer for the orchestrator.
//! Services orchestrate between the repository and the task dispatcher.

pub mod analysis;

// Re-export for convenience
pub use analysis as analysis_service;
