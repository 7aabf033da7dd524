//! Task use-case service.
//!
//! # Responsibility
//! - Provide task create/update/toggle/delete APIs for the surrounding
//!   layer.
//! - Resolve relative deadline expressions at intake.
//! - Trigger a stat recomputation for every affected date.
//!
//! # Invariants
//! - Each mutation performs exactly one recomputation per affected date.
//! - Moving a deadline recomputes both the old and the new date, so neither
//!   day's statistics go stale.
//! - Relative deadlines resolve against the injected clock's today; an
//!   unrecognized expression degrades to today and still creates the task.

use crate::model::task::{TagId, Task, TaskId, TaskValidationError, UserId};
use crate::repo::stat_repo::DailyStatRepository;
use crate::repo::task_repo::{RepoError, TaskRepository};
use crate::resolve::{resolve, Clock};
use crate::service::stats_service::{StatsService, StatsServiceError};
use chrono::NaiveDate;
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Task input violated a domain range.
    Validation(TaskValidationError),
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Stat recomputation failure after a successful task write.
    Stats(StatsServiceError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Stats(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::TaskNotFound(_) => None,
            Self::Repo(err) => Some(err),
            Self::Stats(err) => Some(err),
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<StatsServiceError> for TaskServiceError {
    fn from(value: StatsServiceError) -> Self {
        Self::Stats(value)
    }
}

/// Deadline given at task intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeadlineSpec {
    /// An absolute calendar date.
    On(NaiveDate),
    /// A relative expression resolved against the clock's today.
    Relative(String),
}

/// Input payload for [`TaskService::create_task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub user: UserId,
    pub title: String,
    pub difficulty: u8,
    pub estimated_minutes: u32,
    pub is_life: bool,
    pub tag_id: Option<TagId>,
    pub deadline: DeadlineSpec,
}

/// Task facade wiring mutations to stat recomputations.
pub struct TaskService<T, S, R, C> {
    repo: T,
    stats: StatsService<T, S, R>,
    clock: C,
}

impl<T, S, R, C> TaskService<T, S, R, C>
where
    T: TaskRepository,
    S: DailyStatRepository,
    R: Rng,
    C: Clock,
{
    /// Creates a service from a task repository, the aggregation service and
    /// the clock supplying "today" for relative deadlines.
    pub fn new(repo: T, stats: StatsService<T, S, R>, clock: C) -> Self {
        Self { repo, stats, clock }
    }

    /// Creates one task and recomputes its deadline's statistics.
    pub fn create_task(&mut self, input: NewTask) -> Result<Task, TaskServiceError> {
        let deadline = match input.deadline {
            DeadlineSpec::On(date) => date,
            DeadlineSpec::Relative(text) => resolve(&text, self.clock.today()),
        };

        let task = Task::new(
            input.user,
            input.title,
            input.difficulty,
            input.estimated_minutes,
            input.is_life,
            input.tag_id,
            deadline,
        );
        self.repo.create_task(&task)?;
        self.stats.recompute(deadline, task.user)?;
        Ok(task)
    }

    /// Replaces all mutable fields of an existing task.
    ///
    /// When the deadline moved, both the old and the new date are
    /// recomputed; otherwise only the (unchanged) deadline date is.
    pub fn update_task(&mut self, task: &Task) -> Result<(), TaskServiceError> {
        let existing = self
            .repo
            .get_task(task.uuid)?
            .ok_or(TaskServiceError::TaskNotFound(task.uuid))?;

        self.repo.update_task(task)?;

        if existing.deadline != task.deadline {
            self.stats.recompute(existing.deadline, existing.user)?;
        }
        self.stats.recompute(task.deadline, task.user)?;
        Ok(())
    }

    /// Flips the completion flag and recomputes that day.
    pub fn toggle_completed(&mut self, id: TaskId) -> Result<Task, TaskServiceError> {
        let mut task = self
            .repo
            .get_task(id)?
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        task.is_completed = !task.is_completed;
        self.repo.update_task(&task)?;
        self.stats.recompute(task.deadline, task.user)?;
        Ok(task)
    }

    /// Deletes one task and recomputes its day, clearing the stat record
    /// when the day became empty.
    pub fn delete_task(&mut self, id: TaskId) -> Result<(), TaskServiceError> {
        let task = self
            .repo
            .get_task(id)?
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        self.repo.delete_task(id)?;
        self.stats.recompute(task.deadline, task.user)?;
        Ok(())
    }

    /// Gets one task by stable ID.
    pub fn get_task(&self, id: TaskId) -> Result<Option<Task>, TaskServiceError> {
        Ok(self.repo.get_task(id)?)
    }
}
