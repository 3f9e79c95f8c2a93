//! Row normalization into imported student records.

use std::path::Path;

use rollcall_model::ImportedStudent;

use crate::columns::{ColumnMap, ImportField};
use crate::error::{IngestError, Result};
use crate::table::{RawTable, TableFormat, parse_table, read_bytes};

/// Rows above the first data row, counting from 1.
const HEADER_ROW_OFFSET: usize = 2;

/// Load and normalize a roster file.
pub fn read_roster(path: &Path) -> Result<Vec<ImportedStudent>> {
    let bytes = read_bytes(path)?;
    parse_roster(&bytes, path)
}

/// Normalize roster file content.
///
/// The extension of `path` picks CSV or workbook parsing; otherwise the
/// path only appears in error messages.
pub fn parse_roster(bytes: &[u8], path: &Path) -> Result<Vec<ImportedStudent>> {
    let table = parse_table(bytes, path, TableFormat::from_path(path))?;
    let students = students_from_table(&table)?;
    tracing::info!(
        path = %path.display(),
        students = students.len(),
        "roster file parsed"
    );
    Ok(students)
}

/// Convert every data row, stopping at the first row without a name.
pub fn students_from_table(table: &RawTable) -> Result<Vec<ImportedStudent>> {
    let columns = ColumnMap::from_headers(&table.headers);
    if columns.lacks_name() {
        tracing::warn!(headers = ?table.headers, "no name column found");
    }

    (0..table.rows.len())
        .map(|row| -> Result<ImportedStudent> {
            let cell = |column: usize| table.cell(row, column);
            let name = columns
                .value(ImportField::Name, cell)
                .ok_or(IngestError::MissingName {
                    row: row + HEADER_ROW_OFFSET,
                })?;
            let id = columns
                .value(ImportField::Id, cell)
                .map_or_else(generate_id, str::to_string);
            Ok(ImportedStudent {
                id,
                name: name.to_string(),
                group: columns.value(ImportField::Group, cell).map(str::to_string),
                weight: columns.value(ImportField::Weight, cell).and_then(import_weight),
            })
        })
        .collect()
}

fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Weight cell value; unusable input counts as absent.
fn import_weight(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite() && *weight >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Vec<ImportedStudent>> {
        parse_roster(content.as_bytes(), Path::new("class.csv"))
    }

    #[test]
    fn reads_english_headers() {
        let students = parse("ID,Name,Group,Weight\n1,Amy,A,2.5\n").unwrap();
        assert_eq!(
            students,
            vec![ImportedStudent {
                id: "1".to_string(),
                name: "Amy".to_string(),
                group: Some("A".to_string()),
                weight: Some(2.5),
            }]
        );
    }

    #[test]
    fn reads_chinese_headers() {
        let students = parse("学号,姓名,班级,权重\n20240101,张三,一班,3\n").unwrap();
        assert_eq!(students[0].id, "20240101");
        assert_eq!(students[0].name, "张三");
        assert_eq!(students[0].group.as_deref(), Some("一班"));
        assert_eq!(students[0].weight, Some(3.0));
    }

    #[test]
    fn group_alias_falls_back_to_later_column() {
        let students = parse("姓名,班级,分组\n李四,,第二组\n").unwrap();
        assert_eq!(students[0].group.as_deref(), Some("第二组"));
    }

    #[test]
    fn missing_id_generates_uuid() {
        let students = parse("Name\nAmy\nBo\n").unwrap();
        assert_eq!(students.len(), 2);
        assert!(uuid::Uuid::parse_str(&students[0].id).is_ok());
        assert_ne!(students[0].id, students[1].id);
    }

    #[test]
    fn unusable_weight_is_absent() {
        let students = parse("Name,Weight\nA,abc\nB,-2\nC,\nD,0\nE,inf\n").unwrap();
        let weights: Vec<Option<f64>> = students.iter().map(|s| s.weight).collect();
        assert_eq!(weights, vec![None, None, None, Some(0.0), None]);
    }

    #[test]
    fn missing_name_reports_sheet_row() {
        let err = parse("Name,Group\nAmy,A\nBo,B\n,C\n").unwrap_err();
        assert!(matches!(err, IngestError::MissingName { row: 4 }));
    }

    #[test]
    fn no_name_column_fails_on_first_row() {
        let err = parse("ID,Group\n1,A\n").unwrap_err();
        assert!(matches!(err, IngestError::MissingName { row: 2 }));
    }
}
