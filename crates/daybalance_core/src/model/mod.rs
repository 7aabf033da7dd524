//! Domain model for tasks and their per-day workload statistics.
//!
//! # Responsibility
//! - Define the canonical task record consumed by the statistics engine.
//! - Define the daily stat record produced by the aggregation service.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` scoped to one `UserId`.
//! - A `DailyStat` exists iff at least one task exists for its (date, user)
//!   key; the aggregation service owns that lifecycle.

pub mod stat;
pub mod task;
