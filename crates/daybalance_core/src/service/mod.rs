//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate pure computations against the repository seams.
//! - Keep callers decoupled from storage and scoring details.

pub mod stats_service;
pub mod task_service;
