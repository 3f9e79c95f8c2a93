//! Roll-call data model.
//!
//! Types shared by the draw core, the import/export adapters, and the
//! persistence layer:
//!
//! - **Student** records and the attendance status vocabulary
//! - **Roster**, the single owned store all mutations go through
//! - **Draw settings** and display filters
//! - **Session state**: draw history and the bulk-action selection
//! - **AppState**, the blob persisted between sessions

pub mod error;
pub mod history;
pub mod roster;
pub mod selection;
pub mod settings;
pub mod state;
pub mod status;
pub mod student;

pub use error::{ModelError, Result};
pub use history::DrawHistory;
pub use roster::Roster;
pub use selection::SelectionSet;
pub use settings::{DisplayFilters, DrawMode, DrawSettings, GroupFilter, StatusFilter};
pub use state::AppState;
pub use status::AttendanceStatus;
pub use student::{DEFAULT_WEIGHT, ImportedStudent, Student, clamp_weight, parse_weight};
