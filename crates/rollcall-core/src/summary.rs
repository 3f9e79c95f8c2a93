use rollcall_model::{AppState, AttendanceStatus};

use crate::filter::display_pool;

/// Counters shown alongside the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSummary {
    pub total: usize,
    /// Students passing the current display filters.
    pub filtered: usize,
    pub drawn: usize,
    pub by_status: Vec<(AttendanceStatus, usize)>,
    pub selected: usize,
}

impl RosterSummary {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            total: state.students.len(),
            filtered: display_pool(&state.students, &state.filters).len(),
            drawn: state.students.drawn_count(),
            by_status: state.students.status_counts(),
            selected: state.selected_students.len(),
        }
    }
}
