//! Tag-usage histogram over one day's task set.

use crate::model::stat::TagStat;
use crate::model::task::Task;

/// Counts tag occurrences across the task set and ranks them.
///
/// Untagged tasks contribute nothing. The result is sorted by count
/// descending; tags with equal counts keep the order in which they were
/// first seen while scanning the input (stable sort over first-seen order).
pub fn aggregate_tags(tasks: &[Task]) -> Vec<TagStat> {
    let mut counts: Vec<TagStat> = Vec::new();

    for task in tasks {
        let Some(tag_id) = task.tag_id else {
            continue;
        };
        match counts.iter_mut().find(|entry| entry.tag_id == tag_id) {
            Some(entry) => entry.count += 1,
            None => counts.push(TagStat { tag_id, count: 1 }),
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
