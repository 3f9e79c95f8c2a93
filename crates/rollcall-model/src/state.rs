use serde::{Deserialize, Serialize};

use crate::history::DrawHistory;
use crate::roster::Roster;
use crate::selection::SelectionSet;
use crate::settings::{DisplayFilters, DrawSettings, GroupFilter};

/// Everything one roll-call session persists.
///
/// Missing keys load as defaults, so a partial blob is still usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub students: Roster,
    pub history: DrawHistory,
    pub settings: DrawSettings,
    pub filters: DisplayFilters,
    pub selected_students: SelectionSet,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roster(roster: Roster) -> Self {
        Self {
            students: roster,
            ..Self::default()
        }
    }

    /// Fall back to all groups when the selected group left the roster.
    ///
    /// Returns true when the setting changed.
    pub fn normalize_group(&mut self) -> bool {
        let GroupFilter::Group(name) = &self.settings.current_group else {
            return false;
        };
        if self.students.groups().iter().any(|group| group == name) {
            return false;
        }
        self.settings.current_group = GroupFilter::All;
        true
    }

    /// Drop selected ids that no longer exist in the roster.
    pub fn prune_selection(&mut self) {
        let students = &self.students;
        self.selected_students.retain(|id| students.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::Student;

    #[test]
    fn normalize_group_resets_unknown_group() {
        let mut state = AppState::with_roster(Roster::from_students(vec![
            Student::new("1", "A").with_group("G1"),
        ]));
        state.settings.current_group = GroupFilter::from("G2");
        assert!(state.normalize_group());
        assert_eq!(state.settings.current_group, GroupFilter::All);

        state.settings.current_group = GroupFilter::from("G1");
        assert!(!state.normalize_group());
    }

    #[test]
    fn prune_selection_drops_missing_ids() {
        let mut state =
            AppState::with_roster(Roster::from_students(vec![Student::new("1", "A")]));
        state.selected_students.insert("1");
        state.selected_students.insert("2");
        state.prune_selection();
        assert_eq!(state.selected_students.iter().collect::<Vec<_>>(), vec!["1"]);
    }
}
