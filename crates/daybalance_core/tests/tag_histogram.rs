use chrono::NaiveDate;
use daybalance_core::{aggregate_tags, Task};
use uuid::Uuid;

fn task(tag_id: Option<Uuid>) -> Task {
    Task::new(
        Uuid::nil(),
        "tagged task",
        3,
        30,
        false,
        tag_id,
        NaiveDate::from_ymd_opt(2024, 9, 4).unwrap(),
    )
}

#[test]
fn histogram_is_sorted_non_increasing_by_count() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let c = Uuid::new_v4();
    let tasks = [
        task(Some(a)),
        task(Some(b)),
        task(Some(c)),
        task(Some(b)),
        task(Some(c)),
        task(Some(c)),
        task(None),
    ];

    let histogram = aggregate_tags(&tasks);
    assert_eq!(histogram.len(), 3);
    for pair in histogram.windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }
    assert_eq!((histogram[0].tag_id, histogram[0].count), (c, 3));
    assert_eq!((histogram[1].tag_id, histogram[1].count), (b, 2));
    assert_eq!((histogram[2].tag_id, histogram[2].count), (a, 1));
}

#[test]
fn equal_counts_keep_first_seen_input_order() {
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let tasks = [task(Some(first)), task(Some(second)), task(Some(second)), task(Some(first))];

    let histogram = aggregate_tags(&tasks);
    assert_eq!(histogram[0].tag_id, first);
    assert_eq!(histogram[1].tag_id, second);
}

#[test]
fn fully_untagged_day_yields_an_empty_histogram() {
    assert!(aggregate_tags(&[task(None), task(None), task(None)]).is_empty());
}
