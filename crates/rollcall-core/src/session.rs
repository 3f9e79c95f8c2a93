//! Session state updates around a draw.

use rand::Rng;
use tracing::info;

use rollcall_model::{AppState, DrawHistory, Roster, Student};

use crate::draw::{DrawOptions, draw_with_rng};
use crate::error::{CoreError, Result};
use crate::filter::{display_pool, draw_pool};

/// Record the outcome of a draw on the roster.
///
/// Without replacement every drawn student is flagged as drawn and, if
/// still pending, marked present. With replacement the roster is left
/// untouched.
pub fn apply_draw_result(
    roster: &mut Roster,
    drawn: &[Student],
    with_replacement: bool,
) -> Result<()> {
    if with_replacement {
        return Ok(());
    }
    for student in drawn {
        roster.mark_drawn(&student.id)?;
    }
    Ok(())
}

/// Append one draw's ids to the history.
pub fn record_history(history: &mut DrawHistory, drawn: &[Student]) {
    history.record(drawn.iter().map(|student| student.id.clone()).collect());
}

/// Clear every drawn flag and the draw history.
///
/// Statuses, weights, and notes are kept.
pub fn reset_draw(roster: &mut Roster, history: &mut DrawHistory) {
    roster.clear_drawn();
    history.clear();
}

/// Run one draw against the session state using its current settings.
///
/// Fails with [`CoreError::NothingToDraw`] when no student is eligible;
/// the state is not modified in that case.
pub fn perform_draw<R>(state: &mut AppState, rng: &mut R) -> Result<Vec<Student>>
where
    R: Rng + ?Sized,
{
    let options = DrawOptions::from(&state.settings);
    let count = state.settings.draw_count.max(1) as usize;

    let drawn: Vec<Student> = {
        let pool = draw_pool(&state.students, &state.settings);
        if pool.is_empty() {
            return Err(CoreError::NothingToDraw);
        }
        draw_with_rng(&pool, count, options, rng)
            .into_iter()
            .cloned()
            .collect()
    };

    apply_draw_result(&mut state.students, &drawn, options.with_replacement)?;
    record_history(&mut state.history, &drawn);

    // Return the post-draw records so callers see updated statuses.
    let drawn = drawn
        .into_iter()
        .map(|student| state.students.get(&student.id).cloned().unwrap_or(student))
        .collect::<Vec<_>>();
    info!(
        drawn = drawn.len(),
        history = state.history.len(),
        mode = %state.settings.draw_mode,
        "students drawn"
    );
    Ok(drawn)
}

/// Select or deselect every student in the displayed list.
///
/// Returns how many ids changed membership.
pub fn select_displayed(state: &mut AppState, checked: bool) -> usize {
    let ids: Vec<String> = display_pool(&state.students, &state.filters)
        .into_iter()
        .map(|student| student.id.clone())
        .collect();
    ids.into_iter()
        .filter(|id| {
            if checked {
                state.selected_students.insert(id.clone())
            } else {
                state.selected_students.remove(id)
            }
        })
        .count()
}
