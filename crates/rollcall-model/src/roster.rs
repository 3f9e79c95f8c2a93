//! The roster store.
//!
//! `Roster` owns the ordered student list and is the only place student
//! records are mutated. Ids are unique; insertion order is import order.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::selection::SelectionSet;
use crate::status::AttendanceStatus;
use crate::student::{ImportedStudent, Student, clamp_weight};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Student>", into = "Vec<Student>")]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster, keeping the first record for any repeated id.
    pub fn from_students(students: impl IntoIterator<Item = Student>) -> Self {
        let mut seen = BTreeSet::new();
        let students = students
            .into_iter()
            .filter(|student| seen.insert(student.id.clone()))
            .collect();
        Self { students }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    pub fn as_slice(&self) -> &[Student] {
        &self.students
    }

    pub fn get(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|student| student.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Student> {
        self.students
            .iter_mut()
            .find(|student| student.id == id)
            .ok_or_else(|| ModelError::StudentNotFound { id: id.to_string() })
    }

    /// Distinct non-empty groups, sorted.
    pub fn groups(&self) -> Vec<String> {
        self.students
            .iter()
            .filter_map(|student| student.group.as_deref())
            .filter(|group| !group.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn drawn_count(&self) -> usize {
        self.students.iter().filter(|student| student.drawn).count()
    }

    /// Number of students per status, in cycle order, including zeros.
    pub fn status_counts(&self) -> Vec<(AttendanceStatus, usize)> {
        AttendanceStatus::ALL
            .into_iter()
            .map(|status| {
                let count = self
                    .students
                    .iter()
                    .filter(|student| student.status == status)
                    .count();
                (status, count)
            })
            .collect()
    }

    /// Set a weight, clamped to be non-negative.
    pub fn set_weight(&mut self, id: &str, weight: f64) -> Result<f64> {
        let student = self.get_mut(id)?;
        student.weight = clamp_weight(weight);
        Ok(student.weight)
    }

    pub fn set_notes(&mut self, id: &str, notes: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.notes = notes.into();
        Ok(())
    }

    pub fn set_status(&mut self, id: &str, status: AttendanceStatus) -> Result<()> {
        self.get_mut(id)?.status = status;
        Ok(())
    }

    /// Advance a student's status one step through the cycle.
    pub fn cycle_status(&mut self, id: &str) -> Result<AttendanceStatus> {
        let student = self.get_mut(id)?;
        student.status = student.status.next();
        Ok(student.status)
    }

    /// Apply `status` to every selected student, then clear the selection.
    ///
    /// Returns how many students were updated. Selected ids missing from
    /// the roster are ignored.
    pub fn bulk_set_status(
        &mut self,
        selection: &mut SelectionSet,
        status: AttendanceStatus,
    ) -> usize {
        let mut updated = 0;
        for student in &mut self.students {
            if selection.contains(&student.id) {
                student.status = status;
                updated += 1;
            }
        }
        selection.clear();
        updated
    }

    /// Flag a student as drawn; a pending student is marked present.
    pub fn mark_drawn(&mut self, id: &str) -> Result<()> {
        let student = self.get_mut(id)?;
        student.drawn = true;
        if student.status == AttendanceStatus::Pending {
            student.status = AttendanceStatus::Present;
        }
        Ok(())
    }

    pub fn clear_drawn(&mut self) {
        for student in &mut self.students {
            student.drawn = false;
        }
    }

    /// Overwrite import: the roster becomes exactly the imported records.
    ///
    /// Repeated ids within the import collapse onto the first occurrence,
    /// later rows overlaying earlier ones.
    pub fn replace_with(&mut self, imported: Vec<ImportedStudent>) {
        self.students.clear();
        self.merge(imported);
    }

    /// Merge import: existing records are overlaid by id, new ids are
    /// appended in import order.
    pub fn merge(&mut self, imported: Vec<ImportedStudent>) {
        let mut positions: HashMap<String, usize> = self
            .students
            .iter()
            .enumerate()
            .map(|(idx, student)| (student.id.clone(), idx))
            .collect();
        for record in imported {
            match positions.get(&record.id) {
                Some(&idx) => record.overlay(&mut self.students[idx]),
                None => {
                    positions.insert(record.id.clone(), self.students.len());
                    self.students.push(record.into_student());
                }
            }
        }
    }
}

impl From<Vec<Student>> for Roster {
    fn from(students: Vec<Student>) -> Self {
        Self::from_students(students)
    }
}

impl From<Roster> for Vec<Student> {
    fn from(roster: Roster) -> Self {
        roster.students
    }
}

impl FromIterator<Student> for Roster {
    fn from_iter<T: IntoIterator<Item = Student>>(iter: T) -> Self {
        Self::from_students(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Roster {
        Roster::from_students(vec![
            Student::new("1", "Ann").with_group("B"),
            Student::new("2", "Ben").with_group("A"),
            Student::new("3", "Cat"),
        ])
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let roster = Roster::from_students(vec![Student::new("1", "A"), Student::new("1", "B")]);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get("1").unwrap().name, "A");
    }

    #[test]
    fn groups_are_sorted_and_distinct() {
        let mut roster = sample();
        roster.merge(vec![ImportedStudent {
            group: Some("A".to_string()),
            ..ImportedStudent::new("4", "Dan")
        }]);
        assert_eq!(roster.groups(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let mut roster = sample();
        assert_eq!(
            roster.set_status("99", AttendanceStatus::Late),
            Err(ModelError::StudentNotFound {
                id: "99".to_string()
            })
        );
    }

    #[test]
    fn set_weight_clamps_negative() {
        let mut roster = sample();
        assert_eq!(roster.set_weight("1", -3.0), Ok(0.0));
        assert_eq!(roster.get("1").unwrap().weight, 0.0);
    }

    #[test]
    fn cycle_status_advances() {
        let mut roster = sample();
        assert_eq!(roster.cycle_status("1"), Ok(AttendanceStatus::Present));
        assert_eq!(roster.cycle_status("1"), Ok(AttendanceStatus::Late));
    }

    #[test]
    fn bulk_set_status_clears_selection() {
        let mut roster = sample();
        let mut selection: SelectionSet = ["1", "3", "missing"].into_iter().collect();
        let updated = roster.bulk_set_status(&mut selection, AttendanceStatus::Absent);
        assert_eq!(updated, 2);
        assert!(selection.is_empty());
        assert_eq!(roster.get("1").unwrap().status, AttendanceStatus::Absent);
        assert_eq!(roster.get("2").unwrap().status, AttendanceStatus::Pending);
        assert_eq!(roster.get("3").unwrap().status, AttendanceStatus::Absent);
    }

    #[test]
    fn mark_drawn_only_promotes_pending() {
        let mut roster = sample();
        roster.set_status("2", AttendanceStatus::Late).unwrap();
        roster.mark_drawn("1").unwrap();
        roster.mark_drawn("2").unwrap();
        assert_eq!(roster.get("1").unwrap().status, AttendanceStatus::Present);
        assert_eq!(roster.get("2").unwrap().status, AttendanceStatus::Late);
        assert_eq!(roster.drawn_count(), 2);
    }

    #[test]
    fn replace_with_collapses_repeated_ids() {
        let mut roster = sample();
        roster.replace_with(vec![
            ImportedStudent::new("x", "First"),
            ImportedStudent {
                weight: Some(2.0),
                ..ImportedStudent::new("x", "Second")
            },
        ]);
        assert_eq!(roster.len(), 1);
        let student = roster.get("x").unwrap();
        assert_eq!(student.name, "Second");
        assert_eq!(student.weight, 2.0);
    }
}
