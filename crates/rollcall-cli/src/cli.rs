//! CLI argument definitions for the roll-call tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use rollcall_cli::config::FileFormat;

#[derive(Parser)]
#[command(
    name = "rollcall",
    version,
    about = "Classroom roll call - take attendance and draw students at random",
    long_about = "Take attendance and draw students at random from a class roster.\n\n\
                  The session (roster, statuses, draw history and settings) is saved\n\
                  between runs, so each command continues where the last one stopped."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: platform config folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the saved session state.
    #[arg(long = "state-dir", value_name = "DIR", global = true)]
    pub state_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a roster from a CSV file or a spreadsheet workbook.
    Import(ImportArgs),

    /// Show the roster under the current search and status filters.
    List(ListArgs),

    /// Draw students using the current settings.
    Draw,

    /// Clear drawn marks and draw history.
    Reset,

    /// Show or change draw settings.
    Settings(SettingsArgs),

    /// Set a student's attendance status, or `next` to cycle it.
    Status {
        /// Student ID.
        id: String,
        /// pending, present, late, absent, leave, or next.
        status: String,
    },

    /// Set a student's draw weight.
    Weight {
        /// Student ID.
        id: String,
        /// Non-negative number; anything else counts as 0.
        value: String,
    },

    /// Set a student's notes.
    Note {
        /// Student ID.
        id: String,
        /// Note text (empty to clear).
        text: String,
    },

    /// Change the selection used by bulk actions.
    Select(SelectArgs),

    /// Set the status of every selected student and clear the selection.
    Bulk {
        /// pending, present, late, absent, or leave.
        status: String,
    },

    /// Export the students shown by `list` to a dated xlsx or CSV file.
    Export(ExportArgs),

    /// Show previous draws, oldest first.
    History,

    /// Show roster counters.
    Summary,

    /// Delete the saved session.
    Clear,
}

impl Command {
    /// Whether the command can change the session state.
    pub fn mutates(&self) -> bool {
        !matches!(self, Command::History | Command::Summary | Command::Clear | Command::Export(_))
    }
}

#[derive(Args)]
pub struct ImportArgs {
    /// Roster file (.csv, or a workbook: .xlsx, .xls, .ods).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// How to combine with an existing roster (required when one exists).
    #[arg(long = "mode", value_enum)]
    pub mode: Option<ImportModeArg>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Search by name or ID (saved for later runs; pass "" to clear).
    #[arg(long = "search")]
    pub search: Option<String>,

    /// Status filter: all, pending, present, late, absent, leave.
    #[arg(long = "status")]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct SettingsArgs {
    /// Students per draw.
    #[arg(long = "count", value_parser = clap::value_parser!(u32).range(1..))]
    pub count: Option<u32>,

    /// Whether drawn students stay eligible.
    #[arg(long = "mode", value_enum)]
    pub mode: Option<DrawModeArg>,

    /// Weighted drawing.
    #[arg(long = "weights")]
    pub weights: Option<bool>,

    /// Group to draw from, or `all`.
    #[arg(long = "group")]
    pub group: Option<String>,
}

#[derive(Args)]
pub struct SelectArgs {
    /// Student IDs to add (or remove with --remove).
    pub ids: Vec<String>,

    /// Remove the given IDs instead of adding them.
    #[arg(long = "remove", requires = "ids")]
    pub remove: bool,

    /// Select every displayed student.
    #[arg(long = "all", conflicts_with_all = ["ids", "none"])]
    pub all: bool,

    /// Deselect every displayed student.
    #[arg(long = "none", conflicts_with = "ids")]
    pub none: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output directory (default: config file, then the current directory).
    #[arg(long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// File format (default: config file, then xlsx).
    #[arg(long = "format", value_enum)]
    pub format: Option<FileFormat>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ImportModeArg {
    Merge,
    Overwrite,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DrawModeArg {
    NoRepeat,
    Repeat,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
