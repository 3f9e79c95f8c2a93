//! One roll-call session: stored state plus the actions a teacher takes.
//!
//! Every action works on the in-memory [`AppState`]; callers persist the
//! result with [`RollCall::save`] once the action succeeds.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use rand::Rng;

use rollcall_core::{RosterSummary, display_pool, perform_draw, reset_draw, select_displayed};
use rollcall_ingest::{ImportMode, ImportOutcome, apply_import, read_roster};
use rollcall_model::{
    AppState, AttendanceStatus, DrawMode, GroupFilter, ModelError, StatusFilter, Student,
    parse_weight,
};
use rollcall_output::{ExportOptions, export_students};
use rollcall_persistence::{StateStore, load_or_default, save_or_warn};

/// Direct status assignment or a step through the status cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Set(AttendanceStatus),
    Next,
}

impl FromStr for StatusChange {
    type Err = ModelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("next") {
            Ok(Self::Next)
        } else {
            s.parse().map(Self::Set)
        }
    }
}

/// Settings fields to change; `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub draw_count: Option<u32>,
    pub draw_mode: Option<DrawMode>,
    pub use_weights: Option<bool>,
    pub group: Option<GroupFilter>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.draw_count.is_none()
            && self.draw_mode.is_none()
            && self.use_weights.is_none()
            && self.group.is_none()
    }
}

/// Selection edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Add(Vec<String>),
    Remove(Vec<String>),
    /// Select every student in the displayed list.
    AllDisplayed,
    /// Deselect every student in the displayed list.
    NoneDisplayed,
}

pub struct RollCall {
    store: Box<dyn StateStore>,
    state: AppState,
    /// False while an unreadable stored state could not be moved aside.
    writable: bool,
}

impl RollCall {
    /// Load the stored session, or start a fresh one.
    pub fn open(store: Box<dyn StateStore>) -> Self {
        match load_or_default(store.as_ref()) {
            Some(state) => Self {
                store,
                state,
                writable: true,
            },
            None => Self {
                store,
                state: AppState::default(),
                writable: false,
            },
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Persist the current state. Failures are logged, not returned.
    pub fn save(&self) -> bool {
        if !self.writable {
            tracing::warn!("not saving: the stored state is unreadable and was left in place");
            return false;
        }
        save_or_warn(self.store.as_ref(), &self.state)
    }

    /// Import a roster file.
    ///
    /// A mode must be chosen once the roster holds students; an empty
    /// roster is always overwritten.
    pub fn import(&mut self, path: &Path, mode: Option<ImportMode>) -> Result<ImportOutcome> {
        let mode = match mode {
            Some(mode) => mode,
            None if self.state.students.is_empty() => ImportMode::Overwrite,
            None => bail!(
                "the roster already has {} students; pass --mode merge or --mode overwrite",
                self.state.students.len()
            ),
        };
        let imported = read_roster(path)
            .with_context(|| format!("import failed: {}", path.display()))?;
        Ok(apply_import(&mut self.state, imported, mode))
    }

    /// Update the persisted display filters.
    pub fn set_filters(&mut self, search: Option<String>, status: Option<StatusFilter>) {
        if let Some(search) = search {
            self.state.filters.search = search;
        }
        if let Some(status) = status {
            self.state.filters.status = status;
        }
    }

    /// Students shown under the current filters.
    pub fn displayed(&self) -> Vec<&Student> {
        display_pool(&self.state.students, &self.state.filters)
    }

    pub fn draw<R>(&mut self, rng: &mut R) -> Result<Vec<Student>>
    where
        R: Rng + ?Sized,
    {
        Ok(perform_draw(&mut self.state, rng)?)
    }

    pub fn reset(&mut self) {
        reset_draw(&mut self.state.students, &mut self.state.history);
        tracing::info!("draw state reset");
    }

    /// Apply a settings update. Nothing changes if any field is invalid.
    pub fn update_settings(&mut self, update: SettingsUpdate) -> Result<()> {
        let mut settings = self.state.settings.clone();
        if let Some(count) = update.draw_count {
            settings.set_draw_count(count)?;
        }
        if let Some(mode) = update.draw_mode {
            settings.draw_mode = mode;
        }
        if let Some(use_weights) = update.use_weights {
            settings.use_weights = use_weights;
        }
        if let Some(group) = update.group {
            if let GroupFilter::Group(name) = &group
                && !self.state.students.groups().contains(name)
            {
                bail!("no students in group '{name}'");
            }
            settings.current_group = group;
        }
        self.state.settings = settings;
        Ok(())
    }

    pub fn groups(&self) -> Vec<String> {
        self.state.students.groups()
    }

    /// Returns the student's new status.
    pub fn set_status(&mut self, id: &str, change: StatusChange) -> Result<AttendanceStatus> {
        let status = match change {
            StatusChange::Set(status) => {
                self.state.students.set_status(id, status)?;
                status
            }
            StatusChange::Next => self.state.students.cycle_status(id)?,
        };
        Ok(status)
    }

    /// Set a weight typed by the teacher; returns the stored value.
    pub fn set_weight(&mut self, id: &str, input: &str) -> Result<f64> {
        Ok(self.state.students.set_weight(id, parse_weight(input))?)
    }

    pub fn set_notes(&mut self, id: &str, notes: &str) -> Result<()> {
        Ok(self.state.students.set_notes(id, notes)?)
    }

    /// Returns how many ids changed membership.
    pub fn select(&mut self, change: SelectionChange) -> Result<usize> {
        let changed = match change {
            SelectionChange::Add(ids) => {
                self.ensure_known(&ids)?;
                ids.into_iter()
                    .filter(|id| self.state.selected_students.insert(id.clone()))
                    .count()
            }
            SelectionChange::Remove(ids) => ids
                .iter()
                .filter(|id| self.state.selected_students.remove(id))
                .count(),
            SelectionChange::AllDisplayed => select_displayed(&mut self.state, true),
            SelectionChange::NoneDisplayed => select_displayed(&mut self.state, false),
        };
        Ok(changed)
    }

    fn ensure_known(&self, ids: &[String]) -> Result<()> {
        if let Some(id) = ids.iter().find(|id| !self.state.students.contains(id)) {
            return Err(ModelError::StudentNotFound { id: id.clone() }.into());
        }
        Ok(())
    }

    /// Set the status of every selected student and clear the selection.
    pub fn bulk_set_status(&mut self, status: AttendanceStatus) -> usize {
        let updated = self
            .state
            .students
            .bulk_set_status(&mut self.state.selected_students, status);
        tracing::info!(updated, status = %status, "bulk status applied");
        updated
    }

    /// Write the displayed students to a dated export file in `dir`.
    pub fn export(&self, dir: &Path, date: NaiveDate, options: ExportOptions) -> Result<PathBuf> {
        let path = export_students(dir, &self.displayed(), date, options)?;
        Ok(path)
    }

    /// Draw history with ids resolved to names where the student still exists.
    pub fn history_names(&self) -> Vec<Vec<String>> {
        self.state
            .history
            .iter()
            .map(|ids| {
                ids.iter()
                    .map(|id| {
                        self.state
                            .students
                            .get(id)
                            .map_or_else(|| id.clone(), |student| student.name.clone())
                    })
                    .collect()
            })
            .collect()
    }

    pub fn summary(&self) -> RosterSummary {
        RosterSummary::from_state(&self.state)
    }

    /// Delete the stored state and start over.
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear().context("failed to clear stored state")?;
        self.state = AppState::default();
        self.writable = true;
        tracing::info!("session state cleared");
        Ok(())
    }
}
