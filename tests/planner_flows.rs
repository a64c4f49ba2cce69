use std::time::Instant;

use chrono::NaiveDate;
use smart_planner::planner::event::{has_conflict, Category, PlannerEvent};
use smart_planner::planner::gamification::{advance_streak, award_completion, POINTS_PER_TASK};
use smart_planner::planner::routine::default_routine;
use smart_planner::planner::storage::{
    self, backup_filename, export_all, import_all, FileStorage, MemoryStorage,
};
use smart_planner::planner::store::{timed_sorted, EventStore};
use smart_planner::planner::time::shift_preserving_duration;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

#[test]
fn first_session_seeds_routine_and_persists_it() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = FileStorage::at(dir.path().to_path_buf()).unwrap();

    // Fresh store: load falls back to the default routine.
    let state = storage::load(&files, day());
    assert_eq!(state.events.len(), 14);
    assert_eq!(state.points, 0);
    assert!(state.dark_mode);

    storage::save_events(&mut files, &state.events).unwrap();
    storage::save_last_visit(&mut files, day()).unwrap();

    // Second session sees the seeded day, not a fresh fallback.
    let reloaded = storage::load(&files, day());
    assert_eq!(reloaded.events, state.events);
    assert_eq!(reloaded.last_visit, Some(day()));
}

#[test]
fn completing_tasks_accumulates_points_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = FileStorage::at(dir.path().to_path_buf()).unwrap();

    let state = storage::load(&files, day());
    let mut store = EventStore::new(state.events);
    let mut points = state.points;

    let ids: Vec<String> = store.all().iter().take(3).map(|e| e.id.clone()).collect();
    for id in &ids {
        assert_eq!(store.toggle_complete(id), Some(true));
        points = award_completion(points);
    }
    assert_eq!(points, 3 * POINTS_PER_TASK);

    storage::save_events(&mut files, store.all()).unwrap();
    storage::save_points(&mut files, points).unwrap();

    let reloaded = storage::load(&files, day());
    assert_eq!(reloaded.points, 3 * POINTS_PER_TASK);
    let done = reloaded.events.iter().filter(|e| e.is_completed).count();
    assert_eq!(done, 3);
}

#[test]
fn consecutive_day_visits_extend_the_streak() {
    let mut memory = MemoryStorage::default();
    let day1 = day();
    let day2 = day1.succ_opt().unwrap();
    let day4 = day2.succ_opt().unwrap().succ_opt().unwrap();

    let mut streak = advance_streak(0, None, day1);
    assert_eq!(streak, 1);
    storage::save_streak(&mut memory, streak).unwrap();
    storage::save_last_visit(&mut memory, day1).unwrap();

    let state = storage::load(&memory, day2);
    streak = advance_streak(state.streak, state.last_visit, day2);
    assert_eq!(streak, 2);

    // A missed day resets instead of extending.
    streak = advance_streak(streak, Some(day2), day4);
    assert_eq!(streak, 1);
}

#[test]
fn backup_file_round_trips_through_import() {
    let dir = tempfile::tempdir().unwrap();

    let mut events = default_routine(day());
    events[0].is_completed = true;
    let blob = export_all(&events, 140, 7, false).unwrap();

    let path = dir.path().join(backup_filename(day()));
    std::fs::write(&path, &blob).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let imported = import_all(&raw).unwrap();
    assert_eq!(imported.events, events);
    assert_eq!(imported.points, Some(140));
    assert_eq!(imported.streak, Some(7));
    assert_eq!(imported.dark_mode, Some(false));

    // Applying the import replaces the working set wholesale.
    let mut store = EventStore::new(default_routine(day()));
    store.replace_all(imported.events);
    assert!(store.all()[0].is_completed);
}

#[test]
fn import_rejects_blob_without_events() {
    assert!(import_all(r#"{"points": 99, "streak": 2}"#).is_err());
}

#[test]
fn moving_an_event_keeps_duration_and_flags_new_conflicts() {
    let mut store = EventStore::new(Vec::new());
    let focus = PlannerEvent::new(
        "Deep work".into(),
        "09:30".into(),
        "11:00".into(),
        Category::Work,
        day(),
    );
    let lunch = PlannerEvent::new(
        "Lunch".into(),
        "13:00".into(),
        "14:00".into(),
        Category::Personal,
        day(),
    );
    let focus_id = focus.id.clone();
    store.add(focus);
    store.add(lunch);

    let mut moved = store.get(&focus_id).unwrap().clone();
    let (start, end) = shift_preserving_duration(&moved.start_time, &moved.end_time, 13);
    moved.start_time = start;
    moved.end_time = end;
    assert_eq!(moved.start_time, "13:30");
    assert_eq!(moved.end_time, "15:00");

    assert!(store.update(moved));
    let refs = store.events_for_date(day());
    let moved_ref = refs.iter().find(|e| e.id == focus_id).unwrap();
    assert!(has_conflict(moved_ref, &refs));

    // The sorted view reflects the new slot.
    let timed = timed_sorted(&refs);
    assert_eq!(timed[0].title, "Lunch");
    assert_eq!(timed[1].title, "Deep work");
}

#[test]
fn delete_undo_within_grace_survives_a_save() {
    let mut memory = MemoryStorage::default();
    let mut store = EventStore::new(default_routine(day()));
    let id = store.all()[5].id.clone();
    let before = store.all().len();

    let t0 = Instant::now();
    store.remove(&id, t0);
    storage::save_events(&mut memory, store.all()).unwrap();
    assert_eq!(storage::load(&memory, day()).events.len(), before - 1);

    store.undo_remove(t0).unwrap();
    storage::save_events(&mut memory, store.all()).unwrap();
    let restored = storage::load(&memory, day());
    assert_eq!(restored.events.len(), before);
    assert!(restored.events.iter().any(|e| e.id == id));
}
