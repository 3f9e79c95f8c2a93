//! Classroom roll-call CLI.

use clap::{ColorChoice, Parser};
use rollcall_cli::app::RollCall;
use rollcall_cli::config::{Config, load_config};
use rollcall_cli::logging::{LogConfig, LogFormat, init_logging};
use rollcall_persistence::{FileStore, MemoryStore, StateStore};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod render;

use crate::cli::{Cli, LogFormatArg, LogLevelArg};
use crate::commands::run;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let config = load_config(cli.config.as_deref());
    let store = open_store(&config, &cli);
    let mut app = RollCall::open(store);

    let mutates = cli.command.mutates();
    let exit_code = match run(cli.command, &mut app, &config) {
        Ok(()) => {
            if mutates && !app.save() {
                eprintln!("warning: changes could not be saved");
            }
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn open_store(config: &Config, cli: &Cli) -> Box<dyn StateStore> {
    match config.state_dir(cli.state_dir.as_deref()) {
        Some(dir) => Box::new(FileStore::new(dir)),
        None => {
            tracing::warn!("No state directory available; changes will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
