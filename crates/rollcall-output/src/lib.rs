//! Roll-call record export.
//!
//! Writes students as an xlsx workbook or as CSV, with localized status
//! labels and one row per student, under a file name carrying the export
//! date.

mod error;
mod workbook;
mod writer;

pub use error::{ExportError, Result};
pub use workbook::{SHEET_NAME, workbook_bytes};
pub use writer::{
    EXPORT_HEADERS, ExportFormat, ExportOptions, export_file_name, export_students,
    write_students,
};
