//! Export error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// The roster is empty.
    #[error("no students to export")]
    NothingToExport,

    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("unknown export format '{0}' (expected xlsx or csv)")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, ExportError>;
