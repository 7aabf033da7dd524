//! Balance and productivity score model.
//!
//! # Responsibility
//! - Fold one day's task set into a bounded balance index and an unbounded
//!   productivity index.
//!
//! # Invariants
//! - `balance_num` stays within 0..=100 after rounding and clamping.
//! - `productivity_num` is non-negative and rounded to two decimals.
//! - The overload correction is applied before clamping, never after.

use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Immutable weighting configuration for [`compute_scores`].
///
/// Passed by value at call time so tests can vary capacity and weights
/// without process-wide side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreConfig {
    /// Weight of the difficulty share of a task's load.
    pub difficulty_weight: f64,
    /// Weight of the estimated-time share of a task's load.
    pub time_weight: f64,
    /// Multiplier applied to work tasks.
    pub work_multiplier: f64,
    /// Multiplier applied to life tasks; negative so leisure offsets load.
    pub life_multiplier: f64,
    /// Final per-task scaling factor.
    pub load_scale: f64,
    /// Daily capacity in minutes. Must be positive.
    pub available_minutes: u32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            difficulty_weight: 0.55,
            time_weight: 0.45,
            work_multiplier: 1.3,
            life_multiplier: -0.4,
            load_scale: 0.4,
            available_minutes: 480,
        }
    }
}

/// Result pair of [`compute_scores`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayScores {
    /// Bounded workload index, 0..=100.
    pub balance_num: u8,
    /// Completed-effort index; unbounded above, two-decimal precision.
    pub productivity_num: f64,
}

/// Configuration misuse detected by the score model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// `available_minutes` was zero; the load formula divides by it.
    NonPositiveCapacity,
}

impl Display for ScoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveCapacity => {
                write!(f, "score config available_minutes must be positive")
            }
        }
    }
}

impl Error for ScoreError {}

/// Computes the balance and productivity indices for one day's task set.
///
/// Per task the load is
/// `((difficulty/5)*difficulty_weight + (minutes/capacity)*time_weight)
/// * type_multiplier * load_scale`; life tasks carry the negative
/// multiplier. When the summed estimated time exceeds capacity, the total
/// load is multiplied by `total_minutes / capacity` before rounding, so
/// overbooked days are penalized super-linearly.
///
/// Productivity accumulates only over completed tasks:
/// `(difficulty/5)*difficulty_weight*50 + (minutes/capacity)*time_weight*30`.
///
/// Callers handle the empty-set case themselves (the aggregation service
/// deletes the stat record instead of scoring an empty day); an empty slice
/// here simply yields zero scores.
///
/// # Errors
/// - [`ScoreError::NonPositiveCapacity`] when `config.available_minutes == 0`.
pub fn compute_scores(tasks: &[Task], config: &ScoreConfig) -> Result<DayScores, ScoreError> {
    if config.available_minutes == 0 {
        return Err(ScoreError::NonPositiveCapacity);
    }
    let capacity = f64::from(config.available_minutes);

    let mut total_load = 0.0;
    let mut total_estimated: u64 = 0;
    let mut productivity = 0.0;

    for task in tasks {
        let difficulty_load = f64::from(task.difficulty) / 5.0 * config.difficulty_weight;
        let time_load = f64::from(task.estimated_minutes) / capacity * config.time_weight;
        let type_multiplier = if task.is_life {
            config.life_multiplier
        } else {
            config.work_multiplier
        };

        total_load += (difficulty_load + time_load) * type_multiplier * config.load_scale;
        total_estimated += u64::from(task.estimated_minutes);

        if task.is_completed {
            productivity += f64::from(task.difficulty) / 5.0 * config.difficulty_weight * 50.0
                + f64::from(task.estimated_minutes) / capacity * config.time_weight * 30.0;
        }
    }

    if total_estimated > u64::from(config.available_minutes) {
        total_load *= total_estimated as f64 / capacity;
    }

    let balance_num = (total_load * 100.0).round().clamp(0.0, 100.0) as u8;
    let productivity_num = (productivity * 100.0).round() / 100.0;

    Ok(DayScores {
        balance_num,
        productivity_num,
    })
}
