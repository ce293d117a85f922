//! Railbird Core
//!
//! Core types for the Railbird video-analysis system.
//!
//! This crate contains:
//! - Domain types: Analysis jobs, segments, platforms
//! - DTOs: Request/response and task payload types shared between the
//!   orchestrator and the segment-analyzer workers

pub mod domain;
pub mod dto;
