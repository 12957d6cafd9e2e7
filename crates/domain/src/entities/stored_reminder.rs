//! Stored reminder entity - a reminder saved under a user's document

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::entities::ParsedReminder;
use crate::value_objects::{NotificationWindow, ReminderCategory, ReminderId};

/// A reminder persisted for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredReminder {
    /// Unique identifier
    pub id: ReminderId,
    /// Username owning this reminder
    pub owner: String,
    /// Short title
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Reminder category
    #[serde(rename = "type")]
    pub category: ReminderCategory,
    /// Course label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// When the work is due
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<NaiveDateTime>,
    /// Marked done by the user
    #[serde(default)]
    pub completed: bool,
    /// When this reminder was created
    pub created_at: NaiveDateTime,
    /// Windows for which a notification has already gone out
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notified: Vec<NotificationWindow>,
}

impl StoredReminder {
    /// Create a new open reminder
    #[must_use]
    pub fn new(
        owner: impl Into<String>,
        title: impl Into<String>,
        category: ReminderCategory,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: ReminderId::new(),
            owner: owner.into(),
            title: title.into(),
            description: String::new(),
            category,
            subject: None,
            due_at: None,
            completed: false,
            created_at,
            notified: Vec::new(),
        }
    }

    /// Build a stored reminder from parser output
    #[must_use]
    pub fn from_parsed(
        owner: impl Into<String>,
        parsed: &ParsedReminder,
        created_at: NaiveDateTime,
    ) -> Self {
        let mut reminder = Self::new(owner, parsed.title.clone(), parsed.category, created_at)
            .with_description(parsed.description.clone())
            .with_due_at(parsed.due_at);
        reminder.subject.clone_from(&parsed.subject);
        reminder
    }

    /// Set a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the course label
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the due time
    #[must_use]
    pub const fn with_due_at(mut self, due_at: NaiveDateTime) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Mark as done
    pub fn complete(&mut self) {
        self.completed = true;
    }

    /// Check whether a notification for `window` was already sent
    #[must_use]
    pub fn was_notified(&self, window: NotificationWindow) -> bool {
        self.notified.contains(&window)
    }

    /// Record that a notification for `window` went out
    pub fn mark_notified(&mut self, window: NotificationWindow) {
        if !self.was_notified(window) {
            self.notified.push(window);
        }
    }

    /// Identity used for duplicate detection: normalised title, type, due time
    #[must_use]
    pub fn dedup_key(&self) -> (String, ReminderCategory, Option<NaiveDateTime>) {
        (self.title.trim().to_lowercase(), self.category, self.due_at)
    }
}

impl std::fmt::Display for StoredReminder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.completed { "done" } else { "open" };
        write!(f, "[{}] {} ({state})", self.category, self.title)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::value_objects::Confidence;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn new_reminder_is_open() {
        let reminder = StoredReminder::new("alice", "DBMS", ReminderCategory::Exam, now());
        assert!(!reminder.completed);
        assert!(reminder.due_at.is_none());
        assert!(reminder.notified.is_empty());
    }

    #[test]
    fn from_parsed_copies_fields() {
        let parsed = ParsedReminder {
            category: ReminderCategory::Lab,
            title: "PHYSICS LAB".to_string(),
            subject: Some("Physics".to_string()),
            description: "Subject: Physics\n\nPhysics lab on monday".to_string(),
            due_at: now(),
            type_confidence: Confidence::High,
            date_confidence: Confidence::High,
        };
        let stored = StoredReminder::from_parsed("bob", &parsed, now());
        assert_eq!(stored.owner, "bob");
        assert_eq!(stored.title, "PHYSICS LAB");
        assert_eq!(stored.category, ReminderCategory::Lab);
        assert_eq!(stored.subject.as_deref(), Some("Physics"));
        assert_eq!(stored.due_at, Some(now()));
    }

    #[test]
    fn mark_notified_is_idempotent() {
        let mut reminder = StoredReminder::new("alice", "Quiz", ReminderCategory::Exam, now());
        reminder.mark_notified(NotificationWindow::DayBefore);
        reminder.mark_notified(NotificationWindow::DayBefore);
        assert_eq!(reminder.notified, vec![NotificationWindow::DayBefore]);
        assert!(reminder.was_notified(NotificationWindow::DayBefore));
        assert!(!reminder.was_notified(NotificationWindow::Overdue));
    }

    #[test]
    fn dedup_key_normalises_title() {
        let a = StoredReminder::new("alice", "  Math HW ", ReminderCategory::Assignment, now());
        let b = StoredReminder::new("alice", "math hw", ReminderCategory::Assignment, now());
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn deserializes_minimal_document() {
        let json = r#"{
            "id": "4f1c8a52-6c1e-4d59-8f39-0e8a7c3b2d11",
            "owner": "alice",
            "title": "CN",
            "type": "assignment",
            "created_at": "2024-06-01T08:00:00"
        }"#;
        let reminder: StoredReminder = serde_json::from_str(json).unwrap();
        assert_eq!(reminder.category, ReminderCategory::Assignment);
        assert!(reminder.description.is_empty());
        assert!(!reminder.completed);
    }
}
