//! Degraded storage never ends a session.

use std::fs;

use tempfile::tempdir;

use rollcall_model::{AppState, AttendanceStatus, Roster, Student};
use rollcall_persistence::{
    FileStore, MemoryStore, StateStore, load_or_default, save_or_warn,
};

#[test]
fn corrupt_state_starts_fresh() {
    let store = MemoryStore::with_raw(&b"[1, 2"[..]);
    assert!(store.load().is_err());
    assert_eq!(load_or_default(&store), Some(AppState::default()));
    assert_eq!(store.set_aside_bytes().as_deref(), Some(&b"[1, 2"[..]));
}

#[test]
fn corrupt_file_survives_the_next_save() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let blob = r#"{"students":[{"id":"1","name":"Amy","status":"excused"}]}"#;
    fs::write(store.path(), blob).unwrap();

    let mut state = load_or_default(&store).unwrap();
    assert!(state.students.is_empty());
    state.settings.draw_count = 2;
    assert!(save_or_warn(&store, &state));

    assert_eq!(fs::read_to_string(store.corrupt_path()).unwrap(), blob);
    assert_eq!(store.load().unwrap(), Some(state));
}

#[test]
fn state_survives_a_restart() {
    let dir = tempdir().unwrap();
    let mut state = AppState::with_roster(Roster::from_students(vec![
        Student::new("1", "Amy").with_status(AttendanceStatus::Leave),
    ]));
    state.history.record(vec!["1".to_string()]);
    state.selected_students.insert("1");

    assert!(save_or_warn(&FileStore::new(dir.path()), &state));
    let reopened = FileStore::new(dir.path());
    assert_eq!(load_or_default(&reopened), Some(state));
}

#[test]
fn unwritable_directory_is_reported_not_fatal() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("occupied");
    fs::write(&blocker, b"a file, not a directory").unwrap();

    let store = FileStore::new(&blocker);
    assert!(!save_or_warn(&store, &AppState::default()));
    assert_eq!(load_or_default(&store), Some(AppState::default()));
}
