//! Due status and urgency level value objects
//!
//! Used by the countdown evaluator to bucket a reminder relative to "now".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a reminder stands relative to its due time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    /// Due time has passed
    Overdue,
    /// Due within the hour
    DueNow,
    /// Due within three hours
    DueSoon,
    /// Due later today
    DueToday,
    /// Due on the next calendar day
    DueTomorrow,
    /// Due further out
    Upcoming,
    /// No due date known
    NoDate,
}

impl DueStatus {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Overdue => "Overdue",
            Self::DueNow => "Due Now",
            Self::DueSoon => "Due Soon",
            Self::DueToday => "Due Today",
            Self::DueTomorrow => "Due Tomorrow",
            Self::Upcoming => "Upcoming",
            Self::NoDate => "No Date",
        }
    }
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Urgency level derived from the due status
///
/// Ordered so that `Critical` compares greatest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    #[default]
    Low,
    Medium,
    High,
    Urgent,
    Critical,
}

impl UrgencyLevel {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
            Self::Critical => "Critical",
        }
    }

    /// Get an emoji representation
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Urgent | Self::Critical => "🔴",
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
