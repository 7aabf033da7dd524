//! Pure per-day workload computations.
//!
//! # Responsibility
//! - Convert one day's task set into balance/productivity indices.
//! - Convert the same set into a ranked tag-usage histogram.
//! - Map a balance index to its display message pool.
//!
//! # Invariants
//! - Nothing in this module performs I/O; all inputs arrive as values.
//! - Weighting lives in an explicit [`score::ScoreConfig`] value, never in
//!   module-level mutable state.

pub mod messages;
pub mod score;
pub mod tags;
