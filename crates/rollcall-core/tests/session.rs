//! Session updates and reset behaviour.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use rollcall_core::{
    CoreError, apply_draw_result, perform_draw, record_history, reset_draw,
};
use rollcall_model::{AppState, AttendanceStatus, DrawMode, GroupFilter, Roster, Student};

fn classroom() -> AppState {
    let mut notes = Student::new("4", "Dee").with_group("B").with_weight(3.0);
    notes.notes = "needs hearing aid".to_string();
    AppState::with_roster(Roster::from_students(vec![
        Student::new("1", "Amy").with_group("A"),
        Student::new("2", "Bo").with_group("A").with_status(AttendanceStatus::Absent),
        Student::new("3", "Cy").with_group("B"),
        notes,
    ]))
}

#[test]
fn reset_is_idempotent() {
    let mut state = classroom();
    state.settings.draw_count = 2;
    let mut rng = StdRng::seed_from_u64(1);
    perform_draw(&mut state, &mut rng).unwrap();
    perform_draw(&mut state, &mut rng).unwrap();

    reset_draw(&mut state.students, &mut state.history);
    let once = state.clone();
    reset_draw(&mut state.students, &mut state.history);

    assert_eq!(state, once);
    assert_eq!(state.students.drawn_count(), 0);
    assert!(state.history.is_empty());
}

#[test]
fn reset_keeps_status_weight_and_notes() {
    let mut state = classroom();
    state.settings.draw_count = 4;
    let mut rng = StdRng::seed_from_u64(3);
    perform_draw(&mut state, &mut rng).unwrap();
    reset_draw(&mut state.students, &mut state.history);

    let dee = state.students.get("4").unwrap();
    assert_eq!(dee.status, AttendanceStatus::Present);
    assert_eq!(dee.weight, 3.0);
    assert_eq!(dee.notes, "needs hearing aid");
    assert_eq!(
        state.students.get("2").unwrap().status,
        AttendanceStatus::Absent
    );
}

#[test]
fn apply_with_replacement_leaves_roster_untouched() {
    let mut state = classroom();
    let before = state.students.clone();
    let drawn = vec![state.students.get("1").unwrap().clone()];
    apply_draw_result(&mut state.students, &drawn, true).unwrap();
    record_history(&mut state.history, &drawn);

    assert_eq!(state.students, before);
    assert_eq!(state.history.last().unwrap(), ["1".to_string()]);
}

#[test]
fn group_filter_limits_the_draw() {
    let mut state = classroom();
    state.settings.current_group = GroupFilter::from("A");
    state.settings.draw_count = 10;
    let mut rng = StdRng::seed_from_u64(4);
    let drawn = perform_draw(&mut state, &mut rng).unwrap();

    assert_eq!(drawn.len(), 2);
    assert!(drawn.iter().all(|student| student.group.as_deref() == Some("A")));
    assert!(matches!(
        perform_draw(&mut state, &mut rng),
        Err(CoreError::NothingToDraw)
    ));
}

#[test]
fn search_text_does_not_restrict_the_draw() {
    let mut state = classroom();
    state.filters.search = "Amy".to_string();
    state.settings.draw_count = 4;
    let mut rng = StdRng::seed_from_u64(6);
    let drawn = perform_draw(&mut state, &mut rng).unwrap();
    assert_eq!(drawn.len(), 4);
}

proptest! {
    #[test]
    fn single_draws_visit_every_student_once(size in 1usize..40, seed in any::<u64>()) {
        let roster: Roster = (0..size)
            .map(|idx| Student::new(idx.to_string(), format!("P{idx}")).with_weight((idx % 4) as f64))
            .collect();
        let mut state = AppState::with_roster(roster);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut seen = std::collections::BTreeSet::new();

        while let Ok(drawn) = perform_draw(&mut state, &mut rng) {
            prop_assert_eq!(drawn.len(), 1);
            prop_assert!(seen.insert(drawn[0].id.clone()));
        }
        prop_assert_eq!(seen.len(), size);
        prop_assert_eq!(state.students.drawn_count(), size);
    }

    #[test]
    fn repeat_mode_never_exhausts(size in 1usize..10, count in 1u32..6, seed in any::<u64>()) {
        let roster: Roster = (0..size)
            .map(|idx| Student::new(idx.to_string(), format!("R{idx}")))
            .collect();
        let mut state = AppState::with_roster(roster);
        state.settings.draw_mode = DrawMode::Repeat;
        state.settings.draw_count = count;
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..5 {
            let drawn = perform_draw(&mut state, &mut rng).unwrap();
            prop_assert_eq!(drawn.len(), count as usize);
        }
        prop_assert_eq!(state.students.drawn_count(), 0);
    }
}
