//! Reminder parser - Turn pasted messages into structured reminders
//!
//! The pipeline is four independent stages:
//! - [`classifier`] picks the reminder category
//! - [`datetime_resolver`] finds the due date and time
//! - [`title_extractor`] builds a short title
//! - [`subject_tagger`] tags the course subject
//!
//! Every stage is a pure function of its input. The reference time is always
//! passed in, so the same text and `now` give the same result.

pub mod classifier;
pub mod date_parser;
pub mod datetime_resolver;
pub mod subject_tagger;
pub mod time_parser;
pub mod title_extractor;

use chrono::NaiveDateTime;
use domain::{Confidence, ParsedReminder, ReminderCategory};
use tracing::{debug, instrument};

pub use classifier::{CategoryScores, classify};
pub use date_parser::{DateMatch, DateSource, parse_date_from_text};
pub use datetime_resolver::{ResolvedDateTime, resolve, resolve_datetime};
pub use subject_tagger::extract_subject;
pub use time_parser::parse_time_from_text;
pub use title_extractor::extract_title;

/// Words that make the category obvious to a reader
const CATEGORY_WORDS: [&str; 4] = ["exam", "assignment", "project", "lab"];

/// Parser for free-form reminder text
#[derive(Debug, Clone, Copy, Default)]
pub struct ReminderParser;

impl ReminderParser {
    /// Create a new parser
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse `text` relative to `now`
    #[must_use]
    pub fn parse(&self, text: &str, now: NaiveDateTime) -> ParsedReminder {
        parse(text, now)
    }
}

fn type_confidence(text: &str, category: ReminderCategory) -> Confidence {
    let text = text.to_lowercase();
    let named = text.contains(category.as_str())
        || CATEGORY_WORDS.iter().any(|word| text.contains(word));
    if named {
        Confidence::High
    } else {
        Confidence::Medium
    }
}

const fn date_confidence(resolved: &ResolvedDateTime) -> Confidence {
    if resolved.date_matched() {
        Confidence::High
    } else if resolved.explicit_time {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

fn description(text: &str, subject: Option<&str>) -> String {
    match subject {
        Some(subject) => format!("Subject: {subject}\n\n{text}"),
        None => text.to_string(),
    }
}

/// Run the full pipeline on `text`
///
/// Never fails: unmatched stages fall back to defaults.
#[must_use]
#[instrument(skip(text), fields(len = text.len()))]
pub fn parse(text: &str, now: NaiveDateTime) -> ParsedReminder {
    let category = classify(text);
    let resolved = resolve(text, now);
    let title = extract_title(text, category);
    let subject = extract_subject(text);

    let reminder = ParsedReminder {
        category,
        title,
        description: description(text, subject.as_deref()),
        subject,
        due_at: resolved.due_at,
        type_confidence: type_confidence(text, category),
        date_confidence: date_confidence(&resolved),
    };

    debug!(reminder = %reminder, "Parsed reminder");
    reminder
}
