//! Applying an import to the session state.

use std::fmt;

use rollcall_model::{AppState, ImportedStudent};

/// How imported records combine with the current roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Discard the current roster.
    Overwrite,
    /// Update existing students by id and append new ones.
    Merge,
}

impl ImportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportMode::Overwrite => "overwrite",
            ImportMode::Merge => "merge",
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts reported after an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    pub mode: ImportMode,
    /// Records read from the file.
    pub imported: usize,
    /// Students in the roster afterwards.
    pub total: usize,
    /// Whether the group filter fell back to all groups.
    pub group_reset: bool,
}

/// Apply parsed records to the state.
///
/// Either mode clears the drawn flags and history, drops selected ids that
/// no longer exist, and resets the group filter if its group is gone.
pub fn apply_import(
    state: &mut AppState,
    imported: Vec<ImportedStudent>,
    mode: ImportMode,
) -> ImportOutcome {
    let count = imported.len();
    match mode {
        ImportMode::Overwrite => state.students.replace_with(imported),
        ImportMode::Merge => state.students.merge(imported),
    }
    state.students.clear_drawn();
    state.history.clear();
    state.prune_selection();
    let group_reset = state.normalize_group();

    let outcome = ImportOutcome {
        mode,
        imported: count,
        total: state.students.len(),
        group_reset,
    };
    tracing::info!(
        mode = %mode,
        imported = outcome.imported,
        total = outcome.total,
        "roster imported"
    );
    outcome
}
