//! Xlsx workbook writer.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use rollcall_model::Student;

use crate::error::{ExportError, Result};
use crate::writer::EXPORT_HEADERS;

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "点名记录";

fn build_workbook(students: &[&Student]) -> Result<Workbook> {
    if students.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(EXPORT_HEADERS) {
        sheet.write_string_with_format(0, col, title, &header)?;
    }
    for (row, student) in (1u32..).zip(students) {
        sheet.write_string(row, 0, student.id.as_str())?;
        sheet.write_string(row, 1, student.name.as_str())?;
        if let Some(group) = &student.group {
            sheet.write_string(row, 2, group.as_str())?;
        }
        sheet.write_string(row, 3, student.status.label())?;
        sheet.write_number(row, 4, student.weight)?;
        if !student.notes.is_empty() {
            sheet.write_string(row, 5, student.notes.as_str())?;
        }
    }
    sheet.autofit();
    Ok(workbook)
}

/// Serialize the students into xlsx bytes.
pub fn workbook_bytes(students: &[&Student]) -> Result<Vec<u8>> {
    Ok(build_workbook(students)?.save_to_buffer()?)
}

pub(crate) fn write_workbook(path: &Path, students: &[&Student]) -> Result<()> {
    build_workbook(students)?.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roster_is_rejected() {
        assert!(matches!(workbook_bytes(&[]), Err(ExportError::NothingToExport)));
    }

    #[test]
    fn output_is_a_zip_container() {
        let amy = Student::new("1", "Amy");
        let bytes = workbook_bytes(&[&amy]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
