//! Export formats, file naming, and the CSV writer.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use rollcall_model::Student;

use crate::error::{ExportError, Result};
use crate::workbook::write_workbook;

/// Column headers, in output order.
pub const EXPORT_HEADERS: [&str; 6] = ["ID", "Name", "Group/Class", "Status", "Weight", "Notes"];

const UTF8_BOM: &[u8] = "\u{feff}".as_bytes();

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Excel workbook with a single sheet.
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Export formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Prefix CSV output with a UTF-8 byte order mark so spreadsheet
    /// applications detect the encoding. Ignored for workbooks.
    pub include_bom: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            include_bom: true,
        }
    }
}

/// File name for an export made on `date`.
pub fn export_file_name(date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "点名记录_{}-{}-{}.{}",
        date.year(),
        date.month(),
        date.day(),
        format.extension()
    )
}

/// Write the header row and one row per student as CSV.
pub fn write_students<W: Write>(
    mut writer: W,
    students: &[&Student],
    options: ExportOptions,
) -> Result<()> {
    if students.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    if options.include_bom {
        writer.write_all(UTF8_BOM).map_err(csv::Error::from)?;
    }

    let mut out = csv::Writer::from_writer(writer);
    out.write_record(EXPORT_HEADERS)?;
    for student in students {
        let weight = student.weight.to_string();
        out.write_record([
            student.id.as_str(),
            student.name.as_str(),
            student.group.as_deref().unwrap_or(""),
            student.status.label(),
            weight.as_str(),
            student.notes.as_str(),
        ])?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write a dated export file into `dir` and return its path.
pub fn export_students(
    dir: &Path,
    students: &[&Student],
    date: NaiveDate,
    options: ExportOptions,
) -> Result<PathBuf> {
    if students.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    fs::create_dir_all(dir).map_err(|e| ExportError::Io {
        operation: "create directory",
        path: dir.to_path_buf(),
        source: e,
    })?;

    let path = dir.join(export_file_name(date, options.format));
    match options.format {
        ExportFormat::Xlsx => write_workbook(&path, students)?,
        ExportFormat::Csv => {
            let file = File::create(&path).map_err(|e| ExportError::Io {
                operation: "create",
                path: path.clone(),
                source: e,
            })?;
            write_students(BufWriter::new(file), students, options)?;
        }
    }

    tracing::info!(
        format = %options.format,
        "Exported {} students to {}",
        students.len(),
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_uses_unpadded_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(export_file_name(date, ExportFormat::Xlsx), "点名记录_2024-3-5.xlsx");
        assert_eq!(export_file_name(date, ExportFormat::Csv), "点名记录_2024-3-5.csv");
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert_eq!(" csv ".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("ods".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn empty_roster_is_rejected() {
        let mut buffer = Vec::new();
        let err = write_students(&mut buffer, &[], ExportOptions::default()).unwrap_err();
        assert!(matches!(err, ExportError::NothingToExport));
        assert!(buffer.is_empty());
    }

    #[test]
    fn bom_is_written_by_default() {
        let mut buffer = Vec::new();
        let amy = Student::new("1", "Amy");
        write_students(&mut buffer, &[&amy], ExportOptions::default()).unwrap();
        assert!(buffer.starts_with(UTF8_BOM));
    }
}
