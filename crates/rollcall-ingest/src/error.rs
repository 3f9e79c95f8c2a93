//! Error types for roster import.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while importing a roster file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Roster file not found.
    #[error("roster file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File starts with a byte order mark for an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}; save the file as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// The CSV reader rejected the content.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// The spreadsheet reader rejected the workbook.
    #[error("failed to read workbook {path}: {message}")]
    WorkbookParse { path: PathBuf, message: String },

    /// No data rows below the header row.
    #[error("roster file has no student rows: {path}")]
    EmptyFile { path: PathBuf },

    // === Row Errors ===
    /// A data row has no name in any of the recognised name columns.
    ///
    /// `row` is the spreadsheet row number, counting the header as row 1.
    #[error("row {row}: missing name")]
    MissingName { row: usize },
}

/// Result type for import operations.
pub type Result<T> = std::result::Result<T, IngestError>;
