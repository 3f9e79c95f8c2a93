//! Raw table loading from CSV and spreadsheet workbooks.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Header row plus non-blank data rows, all cells trimmed.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Roster file layout, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    /// Excel or OpenDocument spreadsheet; the first sheet is read.
    Workbook,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Self::Workbook,
            _ => Self::Csv,
        }
    }
}

impl RawTable {
    /// Add a row of trimmed cells. The first non-blank row becomes the
    /// header row; fully blank rows are dropped.
    fn push_row(&mut self, cells: Vec<String>) {
        if cells.iter().all(String::is_empty) {
            return;
        }
        if self.headers.is_empty() {
            self.headers = cells;
        } else {
            self.rows.push(cells);
        }
    }

    fn finish(self, path: &Path) -> Result<Self> {
        if self.rows.is_empty() {
            return Err(IngestError::EmptyFile {
                path: path.to_path_buf(),
            });
        }
        tracing::debug!(
            path = %path.display(),
            columns = self.headers.len(),
            rows = self.rows.len(),
            "parsed roster table"
        );
        Ok(self)
    }

    /// Cell at `column` of `row`, or an empty string for short rows.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }
}

/// Reject byte order marks for encodings other than UTF-8.
pub fn validate_encoding(bytes: &[u8], path: &Path) -> Result<()> {
    if bytes.len() >= 2 {
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().to_string()
}

/// Read the whole file into memory.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Parse file content in the given layout into a [`RawTable`].
///
/// The first non-blank row is the header row. Fully blank rows are
/// skipped. Fails with [`IngestError::EmptyFile`] when no data rows remain.
pub fn parse_table(bytes: &[u8], path: &Path, format: TableFormat) -> Result<RawTable> {
    match format {
        TableFormat::Csv => parse_csv(bytes, path),
        TableFormat::Workbook => parse_workbook(bytes, path),
    }
}

fn parse_csv(bytes: &[u8], path: &Path) -> Result<RawTable> {
    validate_encoding(bytes, path)?;
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut table = RawTable::default();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        table.push_row(record.iter().map(normalize_cell).collect());
    }
    table.finish(path)
}

fn parse_workbook(bytes: &[u8], path: &Path) -> Result<RawTable> {
    let workbook_error = |message: String| IngestError::WorkbookParse {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| workbook_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| workbook_error("workbook has no sheets".to_string()))?
        .map_err(|e| workbook_error(e.to_string()))?;

    let mut table = RawTable::default();
    for row in range.rows() {
        table.push_row(row.iter().map(cell_text).collect());
    }
    table.finish(path)
}

/// Text of a sheet cell. Whole numbers print without a fraction, so a
/// numeric id `7` reads as "7"; error cells read as empty.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        other => normalize_cell(&other.to_string()),
    }
}
