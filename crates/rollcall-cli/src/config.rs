//! Configuration file loading.
//!
//! The configuration lives in the platform-specific config folder:
//! - macOS: ~/Library/Application Support/com.rollcall.Roll Call/
//! - Windows: %APPDATA%/rollcall/Roll Call/config/
//! - Linux: ~/.config/rollcall/
//!
//! ```toml
//! [storage]
//! state_dir = "/home/teacher/rollcall"
//!
//! [export]
//! output_dir = "/home/teacher/Documents"
//! format = "xlsx"     # or "csv"
//! include_bom = true  # csv only
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use rollcall_output::{ExportFormat, ExportOptions};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "rollcall";
const APP_NAME: &str = "Roll Call";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the saved session state.
    pub state_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory for exported records.
    pub output_dir: Option<PathBuf>,
    pub format: FileFormat,
    pub include_bom: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            format: FileFormat::default(),
            include_bom: true,
        }
    }
}

/// Export file format, as written in the config file or on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Xlsx,
    Csv,
}

impl From<FileFormat> for ExportFormat {
    fn from(format: FileFormat) -> Self {
        match format {
            FileFormat::Xlsx => ExportFormat::Xlsx,
            FileFormat::Csv => ExportFormat::Csv,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Default location of the configuration file.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Parse configuration text.
pub fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}

/// Load the configuration from `path`, or the default location.
///
/// Returns defaults if the file is missing, unreadable or unparsable.
pub fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
        tracing::debug!("Could not determine config path, using defaults");
        return Config::default();
    };

    match fs::read_to_string(&path) {
        Ok(content) => match parse_config(&content) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file {:?}: {}, using defaults", path, e);
                Config::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {:?}, using defaults", path);
            Config::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read config file {:?}: {}, using defaults", path, e);
            Config::default()
        }
    }
}

impl Config {
    /// State directory: flag, then file, then the platform data folder.
    ///
    /// `None` when no location can be determined.
    pub fn state_dir(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.storage.state_dir.clone())
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
    }

    /// Export options; a `--format` flag overrides the file.
    pub fn export_options(&self, format: Option<FileFormat>) -> ExportOptions {
        ExportOptions {
            format: format.unwrap_or(self.export.format).into(),
            include_bom: self.export.include_bom,
        }
    }

    /// Export directory: flag, then file, then the working directory.
    pub fn output_dir(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.export.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
