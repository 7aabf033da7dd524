//! Daily workload stat aggregation service.
//!
//! # Responsibility
//! - Recompute the full stat record for one (date, user) key from the
//!   current task set.
//! - Own the upsert-or-delete lifecycle decision.
//!
//! # Invariants
//! - Exactly one task query and at most one stat write per `recompute` call.
//! - A stat record exists iff the day has at least one task.
//! - Every upsert replaces the record wholesale; `center` and the band
//!   message are freshly drawn, never preserved.
//! - Concurrent recomputes for the same key are not serialized here; the
//!   full-record rewrite makes the last writer win with an internally
//!   consistent record. Callers needing strict ordering serialize per key
//!   themselves.

use crate::model::stat::{BalanceData, DailyStat};
use crate::model::task::UserId;
use crate::repo::stat_repo::DailyStatRepository;
use crate::repo::task_repo::{RepoError, TaskRepository};
use crate::stats::messages::pick_balance_message;
use crate::stats::score::{compute_scores, ScoreConfig, ScoreError};
use crate::stats::tags::aggregate_tags;
use chrono::NaiveDate;
use log::info;
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for stat recomputation.
#[derive(Debug)]
pub enum StatsServiceError {
    /// Score configuration violated its contract.
    Score(ScoreError),
    /// Persistence-layer failure, propagated unchanged.
    Repo(RepoError),
}

impl Display for StatsServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Score(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StatsServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Score(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ScoreError> for StatsServiceError {
    fn from(value: ScoreError) -> Self {
        Self::Score(value)
    }
}

impl From<RepoError> for StatsServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// What a recomputation did to the stat record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecomputeOutcome {
    /// The day had no tasks; any existing record was removed.
    Cleared,
    /// The record was created or fully replaced with this payload.
    Upserted(DailyStat),
}

/// Aggregation service over the task-query and stat-store collaborators.
pub struct StatsService<T, S, R> {
    tasks: T,
    stats: S,
    config: ScoreConfig,
    rng: R,
}

impl<T, S, R> StatsService<T, S, R>
where
    T: TaskRepository,
    S: DailyStatRepository,
    R: Rng,
{
    /// Creates a service from its collaborators, weighting configuration and
    /// randomness source.
    pub fn new(tasks: T, stats: S, config: ScoreConfig, rng: R) -> Self {
        Self {
            tasks,
            stats,
            config,
            rng,
        }
    }

    /// The active weighting configuration.
    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    /// Recomputes the stat record for one (date, user) key.
    ///
    /// Loads the day's tasks once; with an empty set the record is deleted
    /// (a no-op when absent), otherwise the score model, tag aggregator and
    /// a fresh display coordinate produce the full replacement payload.
    ///
    /// # Errors
    /// - [`StatsServiceError::Score`] on configuration misuse; nothing is
    ///   written in that case.
    /// - [`StatsServiceError::Repo`] on query or store failures, propagated
    ///   unchanged.
    pub fn recompute(
        &mut self,
        date: NaiveDate,
        user: UserId,
    ) -> Result<RecomputeOutcome, StatsServiceError> {
        let tasks = self.tasks.list_tasks_for_day(date, user)?;

        if tasks.is_empty() {
            self.stats.delete_stat(date, user)?;
            info!("event=daily_stats_cleared module=stats status=ok date={date} user={user}");
            return Ok(RecomputeOutcome::Cleared);
        }

        let scores = compute_scores(&tasks, &self.config)?;
        let tag_stats = aggregate_tags(&tasks);
        let message = pick_balance_message(scores.balance_num, &mut self.rng);

        let stat = DailyStat {
            date,
            user,
            balance_data: BalanceData {
                title: message.title.to_string(),
                message: message.message.to_string(),
                balance_num: scores.balance_num,
            },
            productivity_num: scores.productivity_num,
            tag_stats,
            center: draw_center(&mut self.rng),
        };

        self.stats.upsert_stat(&stat)?;
        info!(
            "event=daily_stats_recomputed module=stats status=ok date={date} user={user} tasks={} balance={} productivity={}",
            tasks.len(),
            stat.balance_data.balance_num,
            stat.productivity_num
        );
        Ok(RecomputeOutcome::Upserted(stat))
    }
}

/// Draws a display coordinate uniformly from [0.2, 0.8] x [0.2, 0.8].
fn draw_center<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    (
        rng.gen::<f64>() * 0.6 + 0.2,
        rng.gen::<f64>() * 0.6 + 0.2,
    )
}
