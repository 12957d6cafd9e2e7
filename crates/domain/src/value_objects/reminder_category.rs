//! Reminder category value object
//!
//! The four kinds of academic reminder the parser can recognise.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Category of an academic reminder
///
/// The declaration order doubles as the tie-break priority used by the
/// classifier: when two categories score equally, the one listed first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReminderCategory {
    /// Exams, tests, quizzes, vivas
    Exam,
    /// Homework and submissions
    #[default]
    Assignment,
    /// Projects, presentations, seminars
    Project,
    /// Lab sessions, practicals, lab records
    Lab,
}

impl ReminderCategory {
    /// Lowercase identifier, as used in stored documents
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exam => "exam",
            Self::Assignment => "assignment",
            Self::Project => "project",
            Self::Lab => "lab",
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Exam => "Exam",
            Self::Assignment => "Assignment",
            Self::Project => "Project",
            Self::Lab => "Lab",
        }
    }

    /// Get an emoji representation
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Exam => "📝",
            Self::Assignment => "📚",
            Self::Project => "📊",
            Self::Lab => "🧪",
        }
    }

    /// All categories in tie-break priority order (highest first)
    #[must_use]
    pub const fn priority_order() -> [Self; 4] {
        [Self::Exam, Self::Assignment, Self::Project, Self::Lab]
    }
}

impl fmt::Display for ReminderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReminderCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exam" => Ok(Self::Exam),
            "assignment" => Ok(Self::Assignment),
            "project" => Ok(Self::Project),
            "lab" => Ok(Self::Lab),
            other => Err(DomainError::ValidationError(format!(
                "Unknown reminder type: {other}"
            ))),
        }
    }
}
