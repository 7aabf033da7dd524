use chrono::NaiveDate;
use daybalance_core::{
    Clock, DailyStatRepository, DeadlineSpec, NewTask, ScoreConfig, SqliteDailyStatRepository,
    SqliteTaskRepository, StatsService, TaskService, TaskServiceError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rusqlite::Connection;
use uuid::Uuid;

// Pins "today" to 2024-09-04, a Wednesday.
struct FixedClock;

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 4).unwrap()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn service(
    conn: &Connection,
) -> TaskService<SqliteTaskRepository<'_>, SqliteDailyStatRepository<'_>, StdRng, FixedClock> {
    TaskService::new(
        SqliteTaskRepository::new(conn),
        StatsService::new(
            SqliteTaskRepository::new(conn),
            SqliteDailyStatRepository::new(conn),
            ScoreConfig::default(),
            StdRng::seed_from_u64(0),
        ),
        FixedClock,
    )
}

fn new_task(user: Uuid, deadline: DeadlineSpec) -> NewTask {
    NewTask {
        user,
        title: "flow task".to_string(),
        difficulty: 3,
        estimated_minutes: 90,
        is_life: false,
        tag_id: None,
        deadline,
    }
}

#[test]
fn creating_a_task_upserts_its_days_stats() {
    let conn = daybalance_core::db::open_db_in_memory().unwrap();
    let user = Uuid::new_v4();

    let task = service(&conn)
        .create_task(new_task(user, DeadlineSpec::On(date(2024, 9, 10))))
        .unwrap();
    assert_eq!(task.deadline, date(2024, 9, 10));

    let stat = SqliteDailyStatRepository::new(&conn)
        .get_stat(date(2024, 9, 10), user)
        .unwrap()
        .expect("stat record should exist");
    assert!(stat.balance_data.balance_num > 0);
}

#[test]
fn relative_deadlines_resolve_against_the_clock() {
    let conn = daybalance_core::db::open_db_in_memory().unwrap();
    let user = Uuid::new_v4();
    let mut svc = service(&conn);

    let tomorrow = svc
        .create_task(new_task(
            user,
            DeadlineSpec::Relative("tomorrow".to_string()),
        ))
        .unwrap();
    assert_eq!(tomorrow.deadline, date(2024, 9, 5));

    let next_monday = svc
        .create_task(new_task(
            user,
            DeadlineSpec::Relative("next week monday".to_string()),
        ))
        .unwrap();
    assert_eq!(next_monday.deadline, date(2024, 9, 9));
}

#[test]
fn unrecognized_relative_deadline_degrades_to_today() {
    let conn = daybalance_core::db::open_db_in_memory().unwrap();
    let user = Uuid::new_v4();

    let task = service(&conn)
        .create_task(new_task(
            user,
            DeadlineSpec::Relative("whenever it suits".to_string()),
        ))
        .unwrap();
    assert_eq!(task.deadline, date(2024, 9, 4));
    assert!(SqliteDailyStatRepository::new(&conn)
        .get_stat(date(2024, 9, 4), user)
        .unwrap()
        .is_some());
}

#[test]
fn moving_a_deadline_recomputes_both_days() {
    let conn = daybalance_core::db::open_db_in_memory().unwrap();
    let user = Uuid::new_v4();
    let mut svc = service(&conn);

    let old_day = date(2024, 9, 10);
    let new_day = date(2024, 9, 12);
    let task = svc
        .create_task(new_task(user, DeadlineSpec::On(old_day)))
        .unwrap();

    let mut moved = task.clone();
    moved.deadline = new_day;
    svc.update_task(&moved).unwrap();

    let repo = SqliteDailyStatRepository::new(&conn);
    assert!(
        repo.get_stat(old_day, user).unwrap().is_none(),
        "old day became empty, so its record must be cleared"
    );
    assert!(repo.get_stat(new_day, user).unwrap().is_some());
}

#[test]
fn toggling_completion_moves_the_productivity_index() {
    let conn = daybalance_core::db::open_db_in_memory().unwrap();
    let user = Uuid::new_v4();
    let mut svc = service(&conn);

    let day = date(2024, 9, 10);
    let task = svc
        .create_task(new_task(user, DeadlineSpec::On(day)))
        .unwrap();

    let repo = SqliteDailyStatRepository::new(&conn);
    let before = repo.get_stat(day, user).unwrap().unwrap();
    assert_eq!(before.productivity_num, 0.0);

    let toggled = svc.toggle_completed(task.uuid).unwrap();
    assert!(toggled.is_completed);
    let after = repo.get_stat(day, user).unwrap().unwrap();
    assert!(after.productivity_num > 0.0);
    assert_eq!(
        after.balance_data.balance_num,
        before.balance_data.balance_num
    );

    let untoggled = svc.toggle_completed(task.uuid).unwrap();
    assert!(!untoggled.is_completed);
    let reverted = repo.get_stat(day, user).unwrap().unwrap();
    assert_eq!(reverted.productivity_num, 0.0);
}

#[test]
fn deleting_the_last_task_clears_the_days_record() {
    let conn = daybalance_core::db::open_db_in_memory().unwrap();
    let user = Uuid::new_v4();
    let mut svc = service(&conn);

    let day = date(2024, 9, 10);
    let first = svc
        .create_task(new_task(user, DeadlineSpec::On(day)))
        .unwrap();
    let second = svc
        .create_task(new_task(user, DeadlineSpec::On(day)))
        .unwrap();

    let repo = SqliteDailyStatRepository::new(&conn);
    svc.delete_task(first.uuid).unwrap();
    assert!(
        repo.get_stat(day, user).unwrap().is_some(),
        "one task remains, so the record stays"
    );

    svc.delete_task(second.uuid).unwrap();
    assert!(repo.get_stat(day, user).unwrap().is_none());
}

#[test]
fn mutations_on_missing_tasks_surface_not_found() {
    let conn = daybalance_core::db::open_db_in_memory().unwrap();
    let mut svc = service(&conn);

    let missing = Uuid::new_v4();
    assert!(matches!(
        svc.toggle_completed(missing).unwrap_err(),
        TaskServiceError::TaskNotFound(id) if id == missing
    ));
    assert!(matches!(
        svc.delete_task(missing).unwrap_err(),
        TaskServiceError::TaskNotFound(id) if id == missing
    ));
}

#[test]
fn invalid_task_input_is_rejected_before_any_write() {
    let conn = daybalance_core::db::open_db_in_memory().unwrap();
    let user = Uuid::new_v4();

    let mut input = new_task(user, DeadlineSpec::On(date(2024, 9, 10)));
    input.difficulty = 9;
    let err = service(&conn).create_task(input).unwrap_err();
    assert!(matches!(err, TaskServiceError::Validation(_)));
    assert!(SqliteDailyStatRepository::new(&conn)
        .get_stat(date(2024, 9, 10), user)
        .unwrap()
        .is_none());
}
