//! Draw settings and display filters.
//!
//! Both persist in the state blob. `"all"` is the wire value for an
//! unrestricted group or status filter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::status::AttendanceStatus;

const ALL: &str = "all";

/// Whether drawn students leave the pool until the next reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawMode {
    #[default]
    #[serde(rename = "no-repeat")]
    NoRepeat,
    #[serde(rename = "repeat")]
    Repeat,
}

impl DrawMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawMode::NoRepeat => "no-repeat",
            DrawMode::Repeat => "repeat",
        }
    }

    pub fn with_replacement(&self) -> bool {
        matches!(self, DrawMode::Repeat)
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DrawMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "no-repeat" => Ok(DrawMode::NoRepeat),
            "repeat" => Ok(DrawMode::Repeat),
            other => Err(ModelError::UnknownDrawMode {
                value: other.to_string(),
            }),
        }
    }
}

/// Group restriction applied to the draw pool.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GroupFilter {
    #[default]
    All,
    Group(String),
}

impl GroupFilter {
    pub fn accepts(&self, group: Option<&str>) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Group(wanted) => group == Some(wanted.as_str()),
        }
    }
}

impl From<String> for GroupFilter {
    fn from(value: String) -> Self {
        if value == ALL {
            GroupFilter::All
        } else {
            GroupFilter::Group(value)
        }
    }
}

impl From<&str> for GroupFilter {
    fn from(value: &str) -> Self {
        GroupFilter::from(value.to_string())
    }
}

impl From<GroupFilter> for String {
    fn from(filter: GroupFilter) -> Self {
        match filter {
            GroupFilter::All => ALL.to_string(),
            GroupFilter::Group(name) => name,
        }
    }
}

impl fmt::Display for GroupFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupFilter::All => f.write_str(ALL),
            GroupFilter::Group(name) => f.write_str(name),
        }
    }
}

/// Status restriction applied to the displayed list only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(AttendanceStatus),
}

impl StatusFilter {
    pub fn accepts(&self, status: AttendanceStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str(ALL),
            StatusFilter::Only(status) => f.write_str(status.as_str()),
        }
    }
}

/// Parameters for the next draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrawSettings {
    /// Students selected per draw, at least 1.
    pub draw_count: u32,
    pub draw_mode: DrawMode,
    pub use_weights: bool,
    pub current_group: GroupFilter,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            draw_count: 1,
            draw_mode: DrawMode::NoRepeat,
            use_weights: true,
            current_group: GroupFilter::All,
        }
    }
}

impl DrawSettings {
    pub fn set_draw_count(&mut self, count: u32) -> Result<(), ModelError> {
        if count == 0 {
            return Err(ModelError::InvalidDrawCount);
        }
        self.draw_count = count;
        Ok(())
    }
}

/// Search box and status filter of the roster view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFilters {
    pub search: String,
    pub status: StatusFilter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_filter_round_trips_all() {
        let json = serde_json::to_string(&GroupFilter::All).unwrap();
        assert_eq!(json, "\"all\"");
        let parsed: GroupFilter = serde_json::from_str("\"Class 2\"").unwrap();
        assert_eq!(parsed, GroupFilter::Group("Class 2".to_string()));
    }

    #[test]
    fn status_filter_parses() {
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "absent".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(AttendanceStatus::Absent))
        );
        assert!("unknown".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn draw_settings_use_camel_case_keys() {
        let json = serde_json::to_value(DrawSettings::default()).unwrap();
        assert_eq!(json["drawCount"], 1);
        assert_eq!(json["drawMode"], "no-repeat");
        assert_eq!(json["useWeights"], true);
        assert_eq!(json["currentGroup"], "all");
    }

    #[test]
    fn zero_draw_count_is_rejected() {
        let mut settings = DrawSettings::default();
        assert_eq!(settings.set_draw_count(0), Err(ModelError::InvalidDrawCount));
        assert_eq!(settings.draw_count, 1);
        settings.set_draw_count(3).unwrap();
        assert_eq!(settings.draw_count, 3);
    }
}
