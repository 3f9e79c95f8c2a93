//! End-to-end roster import from files on disk.

use std::fs;

use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

use rollcall_ingest::{ImportMode, IngestError, apply_import, read_roster};
use rollcall_model::{AppState, AttendanceStatus};

#[test]
fn import_then_merge_from_files() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("class.csv");
    fs::write(
        &first,
        "\u{feff}学号,姓名,班级,权重\n1,张三,一班,2\n2,李四,二班,\n\n3,王五,一班,0.5\n",
    )
    .unwrap();

    let mut state = AppState::new();
    let outcome = apply_import(&mut state, read_roster(&first).unwrap(), ImportMode::Overwrite);
    assert_eq!(outcome.total, 3);
    assert_eq!(state.students.get("2").unwrap().weight, 1.0);
    assert_eq!(state.students.groups(), vec!["一班", "二班"]);

    state.students.set_status("1", AttendanceStatus::Late).unwrap();
    let second = dir.path().join("update.csv");
    fs::write(&second, "ID,Name,Weight\n1,张三,5\n4,赵六,\n").unwrap();

    let outcome = apply_import(&mut state, read_roster(&second).unwrap(), ImportMode::Merge);
    assert_eq!(outcome.imported, 2);
    assert_eq!(outcome.total, 4);

    let zhang = state.students.get("1").unwrap();
    assert_eq!(zhang.weight, 5.0);
    assert_eq!(zhang.group.as_deref(), Some("一班"));
    assert_eq!(zhang.status, AttendanceStatus::Late);
    let ids: Vec<&str> = state.students.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
}

#[test]
fn failed_import_leaves_no_partial_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    fs::write(&path, "Name\nAmy\n\n   \nBo\n").unwrap();
    assert_eq!(read_roster(&path).unwrap().len(), 2);

    fs::write(&path, "Name,Group\nAmy,A\n,B\nCy,C\n").unwrap();
    let err = read_roster(&path).unwrap_err();
    assert!(matches!(err, IngestError::MissingName { row: 3 }));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempdir().unwrap();
    let err = read_roster(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn workbook_roster_reads_the_first_sheet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("class.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, title) in (0u16..).zip(["学号", "姓名", "班级", "权重"]) {
        sheet.write_string(0, col, title).unwrap();
    }
    sheet.write_number(1, 0, 101).unwrap();
    sheet.write_string(1, 1, "张三").unwrap();
    sheet.write_string(1, 2, "一班").unwrap();
    sheet.write_number(1, 3, 2.5).unwrap();
    sheet.write_number(3, 0, 102).unwrap();
    sheet.write_string(3, 1, " 李四 ").unwrap();
    workbook.add_worksheet().write_string(0, 0, "ignored").unwrap();
    workbook.save(&path).unwrap();

    let imported = read_roster(&path).unwrap();
    assert_eq!(imported.len(), 2);
    assert_eq!(imported[0].id, "101");
    assert_eq!(imported[0].name, "张三");
    assert_eq!(imported[0].group.as_deref(), Some("一班"));
    assert_eq!(imported[0].weight, Some(2.5));
    assert_eq!(imported[1].id, "102");
    assert_eq!(imported[1].name, "李四");
    assert_eq!(imported[1].weight, None);
}

#[test]
fn unreadable_workbook_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("class.xlsx");
    fs::write(&path, "学号,姓名\n1,张三\n").unwrap();
    assert!(matches!(
        read_roster(&path),
        Err(IngestError::WorkbookParse { .. })
    ));
}
