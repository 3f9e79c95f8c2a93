//! Attendance status vocabulary.
//!
//! The five statuses form a fixed total order. The cycle control in the
//! roster view advances through that order and wraps around.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Attendance status of a single student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// Not yet called.
    #[default]
    Pending,
    Present,
    Late,
    Absent,
    /// Excused absence.
    Leave,
}

impl AttendanceStatus {
    /// All statuses in cycle order.
    pub const ALL: [AttendanceStatus; 5] = [
        AttendanceStatus::Pending,
        AttendanceStatus::Present,
        AttendanceStatus::Late,
        AttendanceStatus::Absent,
        AttendanceStatus::Leave,
    ];

    /// Wire value used in the persisted state blob.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Pending => "pending",
            AttendanceStatus::Present => "present",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Leave => "leave",
        }
    }

    /// Localized label shown to teachers and written to exports.
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Pending => "未点",
            AttendanceStatus::Present => "出勤",
            AttendanceStatus::Late => "迟到",
            AttendanceStatus::Absent => "缺勤",
            AttendanceStatus::Leave => "请假",
        }
    }

    /// Position in the cycle order.
    pub fn index(&self) -> usize {
        match self {
            AttendanceStatus::Pending => 0,
            AttendanceStatus::Present => 1,
            AttendanceStatus::Late => 2,
            AttendanceStatus::Absent => 3,
            AttendanceStatus::Leave => 4,
        }
    }

    /// Next status in the cycle, wrapping from `Leave` back to `Pending`.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownStatus {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_all_statuses() {
        let mut status = AttendanceStatus::Pending;
        let mut seen = Vec::new();
        for _ in 0..AttendanceStatus::ALL.len() {
            seen.push(status);
            status = status.next();
        }
        assert_eq!(seen, AttendanceStatus::ALL.to_vec());
        assert_eq!(status, AttendanceStatus::Pending);
    }

    #[test]
    fn leave_wraps_to_pending() {
        assert_eq!(AttendanceStatus::Leave.next(), AttendanceStatus::Pending);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(
            "Present".parse::<AttendanceStatus>(),
            Ok(AttendanceStatus::Present)
        );
        assert_eq!(" late ".parse::<AttendanceStatus>(), Ok(AttendanceStatus::Late));
        assert!("sick".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&AttendanceStatus::Absent).unwrap();
        assert_eq!(json, "\"absent\"");
    }
}
