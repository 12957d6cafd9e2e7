//! Academic calculator records - CGPA and attendance results

use serde::{Deserialize, Serialize};
use std::fmt;

/// One semester's grade input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemesterGrade {
    /// Semester grade point average (10-point scale)
    pub sgpa: f64,
    /// Credits earned in the semester
    pub credits: f64,
}

impl SemesterGrade {
    #[must_use]
    pub const fn new(sgpa: f64, credits: f64) -> Self {
        Self { sgpa, credits }
    }

    /// Semesters with a non-positive grade or credit count are ignored
    #[must_use]
    pub fn is_countable(&self) -> bool {
        self.sgpa > 0.0 && self.credits > 0.0
    }
}

/// A semester that contributed to a CGPA result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterResult {
    /// Display label, e.g. "Semester 2"
    pub semester: String,
    pub sgpa: f64,
    pub credits: f64,
    pub grade_points: f64,
}

/// Result of a CGPA calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CgpaReport {
    /// Cumulative GPA on the 10-point scale, 2 decimals
    pub cgpa: f64,
    /// Approximate 4-point equivalent
    pub gpa_4_scale: f64,
    /// Approximate 5-point equivalent
    pub gpa_5_scale: f64,
    pub total_credits: f64,
    pub total_grade_points: f64,
    pub semesters: Vec<SemesterResult>,
}

/// Whether attendance meets the requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Safe,
    AtRisk,
}

impl AttendanceStatus {
    /// Status marker for summaries
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Safe => "✅",
            Self::AtRisk => "⚠️",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::AtRisk => write!(f, "at_risk"),
        }
    }
}

/// Result of an attendance calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceReport {
    pub subject_name: String,
    pub attended: u32,
    pub total: u32,
    pub min_required: f64,
    /// Current attendance percentage, 2 decimals
    pub current_percent: f64,
    pub status: AttendanceStatus,
    /// Consecutive classes needed to reach the minimum (0 when safe)
    pub future_classes: u32,
    /// Classes that can be missed while staying at the minimum (0 when at risk)
    pub can_skip: u32,
    pub message: String,
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countable_semesters() {
        assert!(SemesterGrade::new(8.5, 20.0).is_countable());
        assert!(!SemesterGrade::new(0.0, 20.0).is_countable());
        assert!(!SemesterGrade::new(8.0, -1.0).is_countable());
    }

    #[test]
    fn attendance_status_serialization() {
        let json = serde_json::to_string(&AttendanceStatus::AtRisk).unwrap();
        assert_eq!(json, "\"at_risk\"");
        assert_eq!(AttendanceStatus::Safe.to_string(), "safe");
    }
}
