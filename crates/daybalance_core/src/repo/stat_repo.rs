//! Daily stat repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the per-(date, user) stat record with full-replace upsert
//!   semantics.
//! - Own the atomic replacement of the ranked tag rows.
//!
//! # Invariants
//! - `(date, user)` is unique; the upsert replaces every enumerated stat
//!   field and never patches a subset.
//! - Tag rows are replaced wholesale inside one transaction and read back
//!   in stored rank order.
//! - `delete_stat` is idempotent: deleting an absent record is a no-op.

use crate::model::stat::{BalanceData, DailyStat, TagStat};
use crate::model::task::UserId;
use crate::repo::task_repo::{date_from_db, date_to_db, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

/// Repository interface for the daily stat store.
///
/// The aggregation service only writes through this interface; `get_stat`
/// exists for the surrounding read layer and for tests.
pub trait DailyStatRepository {
    /// Creates or fully replaces the stat record for `(stat.date, stat.user)`.
    fn upsert_stat(&self, stat: &DailyStat) -> RepoResult<()>;
    /// Removes the stat record if present; absent records are not an error.
    fn delete_stat(&self, date: NaiveDate, user: UserId) -> RepoResult<()>;
    /// Reads one stat record with its tag rows in rank order.
    fn get_stat(&self, date: NaiveDate, user: UserId) -> RepoResult<Option<DailyStat>>;
}

/// SQLite-backed daily stat repository.
pub struct SqliteDailyStatRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDailyStatRepository<'conn> {
    /// Constructs a repository over a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DailyStatRepository for SqliteDailyStatRepository<'_> {
    fn upsert_stat(&self, stat: &DailyStat) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO daily_stats (
                date,
                user,
                balance_title,
                balance_message,
                balance_num,
                productivity_num,
                center_x,
                center_y
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT (date, user) DO UPDATE SET
                balance_title = excluded.balance_title,
                balance_message = excluded.balance_message,
                balance_num = excluded.balance_num,
                productivity_num = excluded.productivity_num,
                center_x = excluded.center_x,
                center_y = excluded.center_y,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                date_to_db(stat.date),
                stat.user.to_string(),
                stat.balance_data.title.as_str(),
                stat.balance_data.message.as_str(),
                stat.balance_data.balance_num,
                stat.productivity_num,
                stat.center.0,
                stat.center.1,
            ],
        )?;

        let stat_id: i64 = tx.query_row(
            "SELECT id FROM daily_stats WHERE date = ?1 AND user = ?2;",
            params![date_to_db(stat.date), stat.user.to_string()],
            |row| row.get(0),
        )?;

        tx.execute("DELETE FROM daily_stat_tags WHERE stat_id = ?1;", [stat_id])?;
        for (position, tag) in stat.tag_stats.iter().enumerate() {
            tx.execute(
                "INSERT INTO daily_stat_tags (stat_id, tag_id, count, position)
                 VALUES (?1, ?2, ?3, ?4);",
                params![stat_id, tag.tag_id.to_string(), tag.count, position as i64],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn delete_stat(&self, date: NaiveDate, user: UserId) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM daily_stats WHERE date = ?1 AND user = ?2;",
            params![date_to_db(date), user.to_string()],
        )?;
        Ok(())
    }

    fn get_stat(&self, date: NaiveDate, user: UserId) -> RepoResult<Option<DailyStat>> {
        let header = self
            .conn
            .query_row(
                "SELECT
                    id,
                    date,
                    balance_title,
                    balance_message,
                    balance_num,
                    productivity_num,
                    center_x,
                    center_y
                 FROM daily_stats
                 WHERE date = ?1 AND user = ?2;",
                params![date_to_db(date), user.to_string()],
                |row| {
                    Ok((
                        row.get::<_, i64>("id")?,
                        row.get::<_, String>("date")?,
                        row.get::<_, String>("balance_title")?,
                        row.get::<_, String>("balance_message")?,
                        row.get::<_, u8>("balance_num")?,
                        row.get::<_, f64>("productivity_num")?,
                        row.get::<_, f64>("center_x")?,
                        row.get::<_, f64>("center_y")?,
                    ))
                },
            )
            .optional()?;

        let Some((stat_id, date_text, title, message, balance_num, productivity_num, x, y)) =
            header
        else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT tag_id, count
             FROM daily_stat_tags
             WHERE stat_id = ?1
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([stat_id])?;
        let mut tag_stats = Vec::new();
        while let Some(row) = rows.next()? {
            let tag_text: String = row.get("tag_id")?;
            let tag_id = Uuid::parse_str(&tag_text).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid uuid `{tag_text}` in daily_stat_tags.tag_id"
                ))
            })?;
            tag_stats.push(TagStat {
                tag_id,
                count: row.get("count")?,
            });
        }

        Ok(Some(DailyStat {
            date: date_from_db(&date_text, "daily_stats.date")?,
            user,
            balance_data: BalanceData {
                title,
                message,
                balance_num,
            },
            productivity_num,
            tag_stats,
            center: (x, y),
        }))
    }
}
