use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use rollcall_core::RosterSummary;
use rollcall_ingest::ImportOutcome;
use rollcall_model::{AppState, AttendanceStatus, Student};

pub fn print_students(students: &[&Student], state: &AppState) {
    if students.is_empty() {
        println!("No students match the current filters.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Group"),
        header_cell("Status"),
        header_cell("Weight"),
        header_cell("Drawn"),
        header_cell("Notes"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Center);
    for student in students {
        let selected = if state.selected_students.contains(&student.id) {
            Cell::new("■").fg(Color::Cyan)
        } else {
            dim_cell("□")
        };
        table.add_row(vec![
            selected,
            Cell::new(&student.id),
            name_cell(student),
            student
                .group
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            status_cell(student.status),
            Cell::new(student.weight),
            if student.drawn {
                Cell::new("✓").fg(Color::Green)
            } else {
                dim_cell("")
            },
            Cell::new(&student.notes),
        ]);
    }
    println!("{table}");
}

pub fn print_drawn(drawn: &[Student]) {
    println!("Drawn:");
    for (index, student) in drawn.iter().enumerate() {
        match &student.group {
            Some(group) => println!("  {}. {} ({}, {})", index + 1, student.name, student.id, group),
            None => println!("  {}. {} ({})", index + 1, student.name, student.id),
        }
    }
}

pub fn print_history(history: &[Vec<String>]) {
    if history.is_empty() {
        println!("No draws yet.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Students")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, names) in history.iter().enumerate() {
        table.add_row(vec![Cell::new(index + 1), Cell::new(names.join(", "))]);
    }
    println!("{table}");
}

pub fn print_summary(summary: &RosterSummary) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Counter"), header_cell("Students")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Total"), Cell::new(summary.total)]);
    table.add_row(vec![Cell::new("Shown"), Cell::new(summary.filtered)]);
    table.add_row(vec![Cell::new("Drawn"), Cell::new(summary.drawn)]);
    table.add_row(vec![Cell::new("Selected"), Cell::new(summary.selected)]);
    for (status, count) in &summary.by_status {
        table.add_row(vec![status_cell(*status), count_cell(*count)]);
    }
    println!("{table}");
}

pub fn print_import(outcome: &ImportOutcome) {
    println!(
        "Imported {} students ({}); roster now has {}.",
        outcome.imported, outcome.mode, outcome.total
    );
    if outcome.group_reset {
        println!("Selected group no longer exists; drawing from all groups.");
    }
}

pub fn print_settings(state: &AppState, groups: &[String]) {
    let settings = &state.settings;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Draw count"), Cell::new(settings.draw_count)]);
    table.add_row(vec![Cell::new("Draw mode"), Cell::new(settings.draw_mode)]);
    table.add_row(vec![Cell::new("Weighted"), Cell::new(settings.use_weights)]);
    table.add_row(vec![Cell::new("Group"), Cell::new(&settings.current_group)]);
    table.add_row(vec![
        Cell::new("Available groups"),
        if groups.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(groups.join(", "))
        },
    ]);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn name_cell(student: &Student) -> Cell {
    let cell = Cell::new(&student.name);
    if student.drawn {
        cell.add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn status_cell(status: AttendanceStatus) -> Cell {
    let label = format!("{} ({})", status.label(), status.as_str());
    Cell::new(label).fg(status_color(status))
}

fn status_color(status: AttendanceStatus) -> Color {
    match status {
        AttendanceStatus::Pending => Color::DarkGrey,
        AttendanceStatus::Present => Color::Green,
        AttendanceStatus::Late => Color::Yellow,
        AttendanceStatus::Absent => Color::Red,
        AttendanceStatus::Leave => Color::Blue,
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
