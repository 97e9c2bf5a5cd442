//! Integration tests for loading snapshots and running dashboard batches.

use std::num::NonZeroUsize;

use chrono::NaiveDate;
use habitkit_core::storage::HabitSource;
use habitkit_core::{
    agenda, compute_all, compute_all_parallel, CheckIn, FrequencyRule, Habit, HabitId, Snapshot,
    StatsEngine, StorageError,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample_snapshot() -> Snapshot {
    let start = d(2023, 1, 1);
    let habits = vec![
        Habit::new("Read", FrequencyRule::Daily, start)
            .unwrap()
            .with_id(HabitId::new("read")),
        Habit::new("Gym", FrequencyRule::weekly([1, 3, 5]), start)
            .unwrap()
            .with_id(HabitId::new("gym"))
            .with_category("fitness"),
        Habit::new("Plants", FrequencyRule::interval(4), start)
            .unwrap()
            .with_id(HabitId::new("plants"))
            .with_end_date(d(2023, 1, 9))
            .unwrap(),
        Habit::new("Old", FrequencyRule::Daily, start)
            .unwrap()
            .with_id(HabitId::new("old"))
            .with_archived(true),
    ];
    let mut checkins = Vec::new();
    for day in 1..=10 {
        checkins.push(CheckIn::completed(HabitId::new("read"), d(2023, 1, day)));
        checkins.push(CheckIn::completed(HabitId::new("old"), d(2023, 1, day)));
    }
    for day in [2, 4, 6, 9] {
        checkins.push(CheckIn::completed(HabitId::new("gym"), d(2023, 1, day)));
    }
    for day in [1, 5, 9] {
        checkins.push(CheckIn::completed(HabitId::new("plants"), d(2023, 1, day)));
    }
    Snapshot::new(habits, checkins)
}

#[test]
fn test_save_and_reload_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");

    let original = sample_snapshot();
    original.save(&path).unwrap();
    let loaded = Snapshot::load(&path).unwrap();

    assert!(loaded.rejected.is_empty());
    assert_eq!(loaded.habits, original.habits);
    assert_eq!(loaded.checkins, original.checkins);
    assert_eq!(loaded.habits().unwrap().len(), 4);
}

#[test]
fn test_missing_snapshot_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Snapshot::load(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, StorageError::ReadFailed { .. }));
}

#[test]
fn test_malformed_snapshot_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();
    let err = Snapshot::load(&path).unwrap_err();
    assert!(matches!(err, StorageError::ParseFailed { .. }));
}

#[test]
fn test_dashboard_batch_includes_archived_habits() {
    let snapshot = sample_snapshot();
    let grouped = snapshot.checkins_by_habit();
    let engine = StatsEngine::new();
    let as_of = d(2023, 1, 10);

    let stats = compute_all(&engine, &snapshot.habits, &grouped, as_of);
    assert_eq!(stats.len(), 4);

    // read: every day completed
    assert_eq!(stats[0].current_streak, 10);
    assert_eq!(stats[0].completion_rate, 100);
    // gym: Mon 2, Wed 4, Fri 6, Mon 9 done; Tue 10 not due
    assert_eq!(stats[1].total_due_days, 4);
    assert_eq!(stats[1].current_streak, 4);
    // plants: due 1, 5, 9 and ended on the 9th
    assert_eq!(stats[2].total_due_days, 3);
    assert_eq!(stats[2].current_streak, 3);
    // archived habits still get historical stats
    assert_eq!(stats[3].total_completions, 10);

    let parallel = compute_all_parallel(&engine, &snapshot.habits, &grouped, as_of, NonZeroUsize::new(3));
    assert_eq!(parallel, stats);
}

#[test]
fn test_agenda_skips_archived_and_ended() {
    let snapshot = sample_snapshot();
    let items = agenda(
        &StatsEngine::new(),
        &snapshot.habits,
        &snapshot.checkins_by_habit(),
        d(2023, 1, 13),
    );
    // Friday the 13th: read and gym are due, plants ended, old is archived
    let ids: Vec<_> = items.iter().map(|item| item.habit_id.as_str()).collect();
    assert_eq!(ids, vec!["read", "gym"]);
    assert!(items.iter().all(|item| !item.completed));
    assert_eq!(items[0].current_streak, 0);
}
