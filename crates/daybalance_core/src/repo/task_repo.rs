//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide task CRUD plus the per-(deadline, user) day query that feeds
//!   the statistics engine.
//!
//! # Invariants
//! - `list_tasks_for_day` returns a consistent snapshot in creation order,
//!   so downstream first-seen tie-breaks are deterministic.
//! - Write paths call `Task::validate()` before SQL mutations.

use crate::db::DbError;
use crate::model::task::{Task, TaskId, TaskValidationError, UserId};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    user,
    title,
    difficulty,
    estimated_minutes,
    is_life,
    is_completed,
    tag_id,
    deadline
FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for task persistence.
///
/// `list_tasks_for_day` is the task-query collaborator of the statistics
/// engine; the remaining operations serve the task use-case service.
pub trait TaskRepository {
    /// Persists one task and returns its stable id.
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    /// Replaces all mutable fields of an existing task.
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    /// Gets one task by stable id.
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Returns every task with the given deadline owned by the user, in
    /// creation order.
    fn list_tasks_for_day(&self, date: NaiveDate, user: UserId) -> RepoResult<Vec<Task>>;
    /// Removes one task. Missing ids are a `NotFound` error.
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository over a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                uuid,
                user,
                title,
                difficulty,
                estimated_minutes,
                is_life,
                is_completed,
                tag_id,
                deadline
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                task.uuid.to_string(),
                task.user.to_string(),
                task.title.as_str(),
                task.difficulty,
                task.estimated_minutes,
                bool_to_int(task.is_life),
                bool_to_int(task.is_completed),
                task.tag_id.map(|id| id.to_string()),
                date_to_db(task.deadline),
            ],
        )?;

        Ok(task.uuid)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                difficulty = ?2,
                estimated_minutes = ?3,
                is_life = ?4,
                is_completed = ?5,
                tag_id = ?6,
                deadline = ?7,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?8;",
            params![
                task.title.as_str(),
                task.difficulty,
                task.estimated_minutes,
                bool_to_int(task.is_life),
                bool_to_int(task.is_completed),
                task.tag_id.map(|id| id.to_string()),
                date_to_db(task.deadline),
                task.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.uuid));
        }
        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }

    fn list_tasks_for_day(&self, date: NaiveDate, user: UserId) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE deadline = ?1 AND user = ?2
             ORDER BY created_at ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query(params![date_to_db(date), user.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let task = Task {
        uuid: parse_uuid_column(row, "uuid")?,
        user: parse_uuid_column(row, "user")?,
        title: row.get("title")?,
        difficulty: row.get("difficulty")?,
        estimated_minutes: row.get("estimated_minutes")?,
        is_life: int_to_bool(row.get("is_life")?, "tasks.is_life")?,
        is_completed: int_to_bool(row.get("is_completed")?, "tasks.is_completed")?,
        tag_id: match row.get::<_, Option<String>>("tag_id")? {
            Some(text) => Some(Uuid::parse_str(&text).map_err(|_| {
                RepoError::InvalidData(format!("invalid uuid `{text}` in tasks.tag_id"))
            })?),
            None => None,
        },
        deadline: date_from_db(&row.get::<_, String>("deadline")?, "tasks.deadline")?,
    };
    task.validate()?;
    Ok(task)
}

fn parse_uuid_column(row: &Row<'_>, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{text}` in tasks.{column}")))
}

/// Dates are persisted as zero-padded `YYYY-MM-DD` text.
pub(crate) fn date_to_db(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn date_from_db(text: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{text}` in {column}")))
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}
