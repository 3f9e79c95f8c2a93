use anyhow::{Context, Result};
use chrono::Local;

use rollcall_cli::app::{RollCall, SelectionChange, SettingsUpdate, StatusChange};
use rollcall_cli::config::Config;
use rollcall_ingest::ImportMode;
use rollcall_model::{AttendanceStatus, DrawMode, GroupFilter, StatusFilter};

use crate::cli::{
    Command, DrawModeArg, ExportArgs, ImportModeArg, ListArgs, SelectArgs, SettingsArgs,
};
use crate::render::{
    print_drawn, print_history, print_import, print_settings, print_students, print_summary,
};

/// Run one command against the session.
pub fn run(command: Command, app: &mut RollCall, config: &Config) -> Result<()> {
    match command {
        Command::Import(args) => {
            let mode = args.mode.map(|mode| match mode {
                ImportModeArg::Merge => ImportMode::Merge,
                ImportModeArg::Overwrite => ImportMode::Overwrite,
            });
            let outcome = app.import(&args.file, mode)?;
            print_import(&outcome);
        }
        Command::List(args) => run_list(args, app)?,
        Command::Draw => {
            let drawn = app.draw(&mut rand::thread_rng())?;
            print_drawn(&drawn);
        }
        Command::Reset => {
            app.reset();
            println!("Draw state reset.");
        }
        Command::Settings(args) => run_settings(args, app)?,
        Command::Status { id, status } => {
            let change: StatusChange = status.parse()?;
            let status = app.set_status(&id, change)?;
            println!("{id}: {} ({})", status.label(), status);
        }
        Command::Weight { id, value } => {
            let weight = app.set_weight(&id, &value)?;
            println!("{id}: weight {weight}");
        }
        Command::Note { id, text } => {
            app.set_notes(&id, &text)?;
            println!("{id}: notes updated");
        }
        Command::Select(args) => run_select(args, app)?,
        Command::Bulk { status } => {
            let status: AttendanceStatus = status.parse()?;
            match app.bulk_set_status(status) {
                0 => println!("No students selected."),
                updated => println!("Marked {updated} students as {}.", status.label()),
            }
        }
        Command::Export(args) => run_export(&args, app, config)?,
        Command::History => print_history(&app.history_names()),
        Command::Summary => print_summary(&app.summary()),
        Command::Clear => {
            app.clear()?;
            println!("Saved session cleared.");
        }
    }
    Ok(())
}

fn run_list(args: ListArgs, app: &mut RollCall) -> Result<()> {
    let status = args
        .status
        .as_deref()
        .map(str::parse::<StatusFilter>)
        .transpose()?;
    app.set_filters(args.search, status);
    print_students(&app.displayed(), app.state());
    let summary = app.summary();
    println!(
        "Total {} | Shown {} | Drawn {}",
        summary.total, summary.filtered, summary.drawn
    );
    Ok(())
}

fn run_settings(args: SettingsArgs, app: &mut RollCall) -> Result<()> {
    let update = SettingsUpdate {
        draw_count: args.count,
        draw_mode: args.mode.map(|mode| match mode {
            DrawModeArg::NoRepeat => DrawMode::NoRepeat,
            DrawModeArg::Repeat => DrawMode::Repeat,
        }),
        use_weights: args.weights,
        group: args.group.map(GroupFilter::from),
    };
    if !update.is_empty() {
        app.update_settings(update)?;
    }
    print_settings(app.state(), &app.groups());
    Ok(())
}

fn run_select(args: SelectArgs, app: &mut RollCall) -> Result<()> {
    let change = if args.all {
        SelectionChange::AllDisplayed
    } else if args.none {
        SelectionChange::NoneDisplayed
    } else if args.remove {
        SelectionChange::Remove(args.ids)
    } else {
        SelectionChange::Add(args.ids)
    };
    let changed = app.select(change)?;
    println!(
        "{changed} changed; {} selected.",
        app.state().selected_students.len()
    );
    Ok(())
}

fn run_export(args: &ExportArgs, app: &RollCall, config: &Config) -> Result<()> {
    let dir = config.output_dir(args.output.as_deref());
    let options = config.export_options(args.format);
    let path = app
        .export(&dir, Local::now().date_naive(), options)
        .context("export failed")?;
    println!("Exported to {}", path.display());
    Ok(())
}
