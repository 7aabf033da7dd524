//! Task domain model.
//!
//! # Responsibility
//! - Define the task record whose per-day set drives all statistics.
//! - Validate domain ranges before any persistence write.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another task.
//! - `difficulty` stays within 1..=5.
//! - `deadline` together with `user` is the aggregation key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Identity of the user owning a task; all aggregation is scoped to it.
pub type UserId = Uuid;

/// Reference to a user-owned tag. Absent means "untagged".
pub type TagId = Uuid;

/// Difficulty values accepted by [`Task::validate`].
pub const DIFFICULTY_MIN: u8 = 1;
pub const DIFFICULTY_MAX: u8 = 5;

/// Validation failure for task field ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// `difficulty` is outside 1..=5.
    DifficultyOutOfRange(u8),
    /// `title` is empty or whitespace-only.
    BlankTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DifficultyOutOfRange(value) => write!(
                f,
                "task difficulty {value} is outside {DIFFICULTY_MIN}..={DIFFICULTY_MAX}"
            ),
            Self::BlankTitle => write!(f, "task title cannot be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
///
/// The statistics engine reads this shape only; create/update flows own the
/// field values and must call [`Task::validate`] before persisting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable global ID used for linking and auditing.
    pub uuid: TaskId,
    /// Owning user; every query and stat record is scoped to it.
    pub user: UserId,
    /// Short human-readable summary.
    pub title: String,
    /// Subjective effort, 1 (trivial) to 5 (hard).
    pub difficulty: u8,
    /// Estimated effort in minutes.
    pub estimated_minutes: u32,
    /// `true` for personal/life tasks, `false` for work tasks.
    pub is_life: bool,
    /// Completion flag; drives the productivity index.
    pub is_completed: bool,
    /// Optional tag reference; untagged tasks carry `None`.
    pub tag_id: Option<TagId>,
    /// Due date; the aggregation key together with `user`.
    pub deadline: NaiveDate,
}

impl Task {
    /// Creates a new incomplete task with a generated stable ID.
    pub fn new(
        user: UserId,
        title: impl Into<String>,
        difficulty: u8,
        estimated_minutes: u32,
        is_life: bool,
        tag_id: Option<TagId>,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            user,
            title: title.into(),
            difficulty,
            estimated_minutes,
            is_life,
            is_completed: false,
            tag_id,
            deadline,
        }
    }

    /// Checks domain ranges on this task.
    ///
    /// # Errors
    /// - `DifficultyOutOfRange` when `difficulty` is outside 1..=5.
    /// - `BlankTitle` when the title is empty after trimming.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if !(DIFFICULTY_MIN..=DIFFICULTY_MAX).contains(&self.difficulty) {
            return Err(TaskValidationError::DifficultyOutOfRange(self.difficulty));
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        Ok(())
    }
}
