//! Filter policy: which students are shown and which can be drawn.
//!
//! The status filter and search text only affect the displayed list.
//! Draw eligibility depends on the group setting and the repeat policy.

use rollcall_model::{DisplayFilters, DrawMode, DrawSettings, Roster, Student};

/// Students matching the search text and status filter, in roster order.
pub fn display_pool<'a>(roster: &'a Roster, filters: &DisplayFilters) -> Vec<&'a Student> {
    roster
        .iter()
        .filter(|student| student.matches_search(&filters.search))
        .filter(|student| filters.status.accepts(student.status))
        .collect()
}

/// Students eligible for the next draw, in roster order.
pub fn draw_pool<'a>(roster: &'a Roster, settings: &DrawSettings) -> Vec<&'a Student> {
    roster
        .iter()
        .filter(|student| settings.current_group.accepts(student.group.as_deref()))
        .filter(|student| settings.draw_mode == DrawMode::Repeat || !student.drawn)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_model::{AttendanceStatus, GroupFilter, StatusFilter};

    fn roster() -> Roster {
        let mut drawn = Student::new("3", "Carol").with_group("B");
        drawn.drawn = true;
        Roster::from_students(vec![
            Student::new("1", "Alice").with_group("A"),
            Student::new("2", "Bob")
                .with_group("A")
                .with_status(AttendanceStatus::Absent),
            drawn,
            Student::new("4", "Dave"),
        ])
    }

    fn ids(students: &[&Student]) -> Vec<String> {
        students.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn display_pool_applies_search_and_status() {
        let roster = roster();
        let filters = DisplayFilters {
            search: "A".to_string(),
            status: StatusFilter::All,
        };
        // "a" appears in Alice, Carol, Dave
        assert_eq!(ids(&display_pool(&roster, &filters)), vec!["1", "3", "4"]);

        let filters = DisplayFilters {
            search: String::new(),
            status: StatusFilter::Only(AttendanceStatus::Absent),
        };
        assert_eq!(ids(&display_pool(&roster, &filters)), vec!["2"]);
    }

    #[test]
    fn display_pool_matches_id() {
        let roster = roster();
        let filters = DisplayFilters {
            search: "4".to_string(),
            status: StatusFilter::All,
        };
        assert_eq!(ids(&display_pool(&roster, &filters)), vec!["4"]);
    }

    #[test]
    fn draw_pool_skips_drawn_in_no_repeat_mode() {
        let roster = roster();
        let settings = DrawSettings::default();
        assert_eq!(ids(&draw_pool(&roster, &settings)), vec!["1", "2", "4"]);
    }

    #[test]
    fn draw_pool_keeps_drawn_in_repeat_mode() {
        let roster = roster();
        let settings = DrawSettings {
            draw_mode: DrawMode::Repeat,
            ..DrawSettings::default()
        };
        assert_eq!(ids(&draw_pool(&roster, &settings)), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn draw_pool_filters_by_group() {
        let roster = roster();
        let settings = DrawSettings {
            current_group: GroupFilter::from("A"),
            ..DrawSettings::default()
        };
        assert_eq!(ids(&draw_pool(&roster, &settings)), vec!["1", "2"]);
    }

    #[test]
    fn absent_students_stay_drawable() {
        let roster = roster();
        let pool = draw_pool(&roster, &DrawSettings::default());
        assert!(pool.iter().any(|s| s.status == AttendanceStatus::Absent));
    }
}
