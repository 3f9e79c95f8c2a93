//! Persistent storage for roll-call session state.
//!
//! The whole session (roster, history, settings, filters and selection)
//! is stored as one JSON document under [`STORAGE_KEY`]. Storage problems
//! never end a session: loading falls back to a fresh state and failed
//! saves are reported as warnings.

mod error;
mod store;

pub use error::{PersistenceError, Result};
pub use store::{FileStore, MemoryStore, STORAGE_KEY, StateStore};

use rollcall_model::AppState;

/// Load the stored state, starting fresh when it is missing or unreadable.
///
/// A corrupt state is moved aside first so the next save cannot destroy
/// it. Returns `None` instead of a fresh state when that move fails,
/// since saving would then overwrite the only copy.
pub fn load_or_default(store: &dyn StateStore) -> Option<AppState> {
    match store.load() {
        Ok(Some(state)) => Some(state),
        Ok(None) => Some(AppState::default()),
        Err(err @ PersistenceError::Corrupt { .. }) => {
            tracing::warn!(
                error = %err,
                suggestion = %err.suggestion().unwrap_or_default(),
                "{}",
                err.user_message()
            );
            match store.set_aside() {
                Ok(backup) => {
                    if let Some(backup) = backup {
                        tracing::warn!("Unreadable session state kept at {}", backup.display());
                    }
                    Some(AppState::default())
                }
                Err(aside) => {
                    tracing::error!(error = %aside, "{}", aside.user_message());
                    None
                }
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "{}", err.user_message());
            Some(AppState::default())
        }
    }
}

/// Save the state, logging a warning on failure.
///
/// Returns whether the state was written.
pub fn save_or_warn(store: &dyn StateStore, state: &AppState) -> bool {
    match store.save(state) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(
                error = %err,
                suggestion = %err.suggestion().unwrap_or_default(),
                "{}",
                err.user_message()
            );
            false
        }
    }
}
