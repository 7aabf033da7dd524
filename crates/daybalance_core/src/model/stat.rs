//! Daily stat record produced by the aggregation service.
//!
//! # Responsibility
//! - Define the write model for per-(date, user) workload statistics.
//!
//! # Invariants
//! - One record per (date, user); the pair is unique in storage.
//! - `balance_num` stays within 0..=100.
//! - `tag_stats` is sorted by count descending, first-seen order on ties.
//! - `center` coordinates stay within [0.2, 0.8].
//!
//! The record is write-only from the engine's perspective: every
//! recomputation replaces the enumerated fields wholesale instead of patching
//! them, and `center` is freshly drawn rather than preserved.

use crate::model::task::{TagId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Balance band summary shown alongside the numeric index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceData {
    /// Short headline from the band's message pool.
    pub title: String,
    /// Longer encouragement/warning text from the same pool entry.
    pub message: String,
    /// Bounded workload index, 0..=100.
    pub balance_num: u8,
}

/// One entry of the ranked tag-usage histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagStat {
    /// Tag carried by the counted tasks.
    pub tag_id: TagId,
    /// Number of tasks due that day carrying the tag.
    pub count: u32,
}

/// Per-(date, user) workload statistics record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    /// Calendar date the statistics describe.
    pub date: NaiveDate,
    /// Owning user.
    pub user: UserId,
    /// Balance index plus its displayed band message.
    pub balance_data: BalanceData,
    /// Unbounded completed-effort index, two-decimal precision.
    pub productivity_num: f64,
    /// Ranked tag histogram; empty when no task that day carries a tag.
    pub tag_stats: Vec<TagStat>,
    /// Display layout coordinate in [0.2, 0.8] x [0.2, 0.8], resampled on
    /// every recomputation.
    pub center: (f64, f64),
}

#[cfg(test)]
mod tests {
    use super::{BalanceData, DailyStat, TagStat};
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn daily_stat_serializes_with_camel_case_contract() {
        let stat = DailyStat {
            date: NaiveDate::from_ymd_opt(2024, 9, 4).expect("valid date"),
            user: Uuid::nil(),
            balance_data: BalanceData {
                title: "t".to_string(),
                message: "m".to_string(),
                balance_num: 42,
            },
            productivity_num: 12.5,
            tag_stats: vec![TagStat {
                tag_id: Uuid::nil(),
                count: 2,
            }],
            center: (0.25, 0.75),
        };

        let json = serde_json::to_value(&stat).expect("stat should serialize");
        assert_eq!(json["date"], "2024-09-04");
        assert_eq!(json["balanceData"]["balanceNum"], 42);
        assert_eq!(json["productivityNum"], 12.5);
        assert_eq!(json["tagStats"][0]["count"], 2);
    }
}
