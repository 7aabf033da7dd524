//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contracts the statistics engine orchestrates
//!   against (task query, stat upsert/delete).
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Task writes enforce `Task::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors; invalid persisted state is rejected, not masked.

pub mod stat_repo;
pub mod task_repo;
