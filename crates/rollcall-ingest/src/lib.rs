//! Roster import.
//!
//! Reads a class roster from CSV or the first sheet of a workbook
//! (xlsx, xls, ods), resolves the header spellings used by
//! common spreadsheet templates, and applies the result to the session
//! state in overwrite or merge mode.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use rollcall_ingest::{ImportMode, apply_import, read_roster};
//!
//! let imported = read_roster(Path::new("class.csv"))?;
//! let outcome = apply_import(&mut state, imported, ImportMode::Merge);
//! ```

mod apply;
mod columns;
mod error;
mod normalize;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading ===
pub use columns::ImportField;
pub use normalize::{parse_roster, read_roster};
pub use table::TableFormat;

// === Applying ===
pub use apply::{ImportMode, ImportOutcome, apply_import};
