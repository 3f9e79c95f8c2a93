//! Student records.

use serde::{Deserialize, Deserializer, Serialize};

use crate::status::AttendanceStatus;

/// Neutral selection weight; a pool where every weight equals this
/// draws uniformly.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique within the roster.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub group: Option<String>,
    /// Relative selection weight, never negative.
    #[serde(default = "default_weight", deserialize_with = "deserialize_weight")]
    pub weight: f64,
    #[serde(default)]
    pub status: AttendanceStatus,
    /// Already drawn since the last reset (no-repeat mode only).
    #[serde(default)]
    pub drawn: bool,
    #[serde(default)]
    pub notes: String,
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

/// Stored weights pass through [`clamp_weight`]; `null` reads as the default.
fn deserialize_weight<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let weight = Option::<f64>::deserialize(deserializer)?;
    Ok(weight.map_or(DEFAULT_WEIGHT, clamp_weight))
}

impl Student {
    /// Create a student with default weight, status, and notes.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group: None,
            weight: DEFAULT_WEIGHT,
            status: AttendanceStatus::Pending,
            drawn: false,
            notes: String::new(),
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = clamp_weight(weight);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: AttendanceStatus) -> Self {
        self.status = status;
        self
    }

    /// Case-insensitive substring match on name or id.
    pub fn matches_search(&self, search: &str) -> bool {
        if search.is_empty() {
            return true;
        }
        let needle = search.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.id.to_lowercase().contains(&needle)
    }
}

/// Student fields supplied by one imported row.
///
/// `None` means the source row did not provide the field. Merge imports
/// inherit absent fields from the existing record.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedStudent {
    pub id: String,
    pub name: String,
    pub group: Option<String>,
    pub weight: Option<f64>,
}

impl ImportedStudent {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group: None,
            weight: None,
        }
    }

    /// Build a fresh student: pending, not drawn, no notes, weight 1 when absent.
    pub fn into_student(self) -> Student {
        Student {
            id: self.id,
            name: self.name,
            group: self.group,
            weight: self.weight.map_or(DEFAULT_WEIGHT, clamp_weight),
            status: AttendanceStatus::Pending,
            drawn: false,
            notes: String::new(),
        }
    }

    /// Overlay the supplied fields onto an existing record.
    pub fn overlay(&self, existing: &mut Student) {
        existing.name.clone_from(&self.name);
        if let Some(group) = &self.group {
            existing.group = Some(group.clone());
        }
        if let Some(weight) = self.weight {
            existing.weight = clamp_weight(weight);
        }
    }
}

/// Clamp a weight to `[0, inf)`; NaN and infinities become 0.
pub fn clamp_weight(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Parse a weight typed by a teacher.
///
/// Non-numeric input is treated as 0 and negative values clamp to 0.
pub fn parse_weight(input: &str) -> f64 {
    input.trim().parse::<f64>().map_or(0.0, clamp_weight)
}
