//! Parsed reminder - the structured result of reading a free-form message

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::value_objects::{Confidence, ReminderCategory};

/// Structured reminder extracted from pasted text
///
/// A pure transformation result: it has no identity and is never mutated
/// after the parser builds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReminder {
    /// Detected category
    #[serde(rename = "type")]
    pub category: ReminderCategory,
    /// Short human-readable title
    pub title: String,
    /// Course label, if a known subject was mentioned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Original text, prefixed with the subject line when one was found
    pub description: String,
    /// Resolved due date-time (naive local time)
    pub due_at: NaiveDateTime,
    /// Confidence in `category`
    pub type_confidence: Confidence,
    /// Confidence in `due_at`
    pub date_confidence: Confidence,
}

impl ParsedReminder {
    /// Calendar date part of the due time, formatted `YYYY-MM-DD`
    #[must_use]
    pub fn parsed_date(&self) -> String {
        self.due_at.format("%Y-%m-%d").to_string()
    }

    /// Due time formatted `HH:MM`
    #[must_use]
    pub fn due_time(&self) -> String {
        self.due_at.format("%H:%M").to_string()
    }
}

impl std::fmt::Display for ParsedReminder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} (due {})",
            self.category,
            self.title,
            self.due_at.format("%Y-%m-%d %H:%M")
        )
    }
}
