//! Repository Module
//!
//! Data access layer for the orchestrator.
//! Each repository handles database operations for a specific domain entity.

pub mod job;

// Re-export for convenience
pub use job as job_repository;
