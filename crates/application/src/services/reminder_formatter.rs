//! Reminder message formatting utilities
//!
//! Pure functions that render a stored reminder into notification text.

use domain::{NotificationWindow, StoredReminder};

use super::countdown::Countdown;

/// One-line subject for a notification
#[must_use]
pub fn format_subject(reminder: &StoredReminder, window: NotificationWindow) -> String {
    let prefix = match window {
        NotificationWindow::DayBefore => "Due within 24 hours",
        NotificationWindow::HourBefore => "Due within the hour",
        NotificationWindow::Overdue => "Overdue",
    };
    format!("{} {prefix}: {}", reminder.category.emoji(), reminder.title)
}

/// Multi-line notification body
#[must_use]
pub fn format_body(reminder: &StoredReminder, countdown: &Countdown) -> String {
    let mut parts = Vec::new();

    parts.push(format!(
        "This is a reminder about your upcoming {}:",
        reminder.category
    ));
    parts.push(String::new());
    parts.push(format!("Title: {}", reminder.title));
    parts.push(format!("Type: {}", reminder.category.label()));

    if let Some(subject) = &reminder.subject {
        parts.push(format!("Subject: {subject}"));
    }

    let due = reminder.due_at.map_or_else(
        || "Not specified".to_string(),
        |due| due.format("%a, %b %-d, %Y %H:%M").to_string(),
    );
    parts.push(format!("Due Date: {due}"));

    if !reminder.description.is_empty() {
        parts.push(format!("Description: {}", reminder.description));
    }

    parts.push(String::new());
    parts.push(format!("Status: {}", countdown.text));

    parts.join("\n")
}

/// Compact single-line summary, used by listings
#[must_use]
pub fn format_summary(reminder: &StoredReminder, countdown: &Countdown) -> String {
    let check = if reminder.completed { "✅" } else { countdown.urgency.emoji() };
    let subject = reminder
        .subject
        .as_deref()
        .map(|s| format!(" ({s})"))
        .unwrap_or_default();
    format!(
        "{check} {} {}{subject} - {}",
        reminder.category.emoji(),
        reminder.title,
        countdown.text
    )
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use domain::{DueStatus, ReminderCategory, UrgencyLevel};

    use super::*;

    fn due() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn sample() -> StoredReminder {
        StoredReminder::new("alice", "DBMS", ReminderCategory::Exam, due())
            .with_subject("Dbms")
            .with_due_at(due())
    }

    fn countdown() -> Countdown {
        Countdown {
            status: DueStatus::DueTomorrow,
            urgency: UrgencyLevel::High,
            text: "Due tomorrow".to_string(),
        }
    }

    #[test]
    fn subject_line_names_window() {
        let subject = format_subject(&sample(), NotificationWindow::DayBefore);
        assert!(subject.contains("Due within 24 hours: DBMS"));
        let subject = format_subject(&sample(), NotificationWindow::Overdue);
        assert!(subject.contains("Overdue: DBMS"));
    }

    #[test]
    fn body_lists_fields() {
        let body = format_body(&sample(), &countdown());
        assert!(body.contains("upcoming exam:"));
        assert!(body.contains("Type: Exam"));
        assert!(body.contains("Subject: Dbms"));
        assert!(body.contains("Due Date: Mon, Jun 3, 2024 09:00"));
        assert!(body.contains("Status: Due tomorrow"));
        assert!(!body.contains("Description:"));
    }

    #[test]
    fn body_without_due_date() {
        let reminder = StoredReminder::new("alice", "Essay", ReminderCategory::Assignment, due());
        let body = format_body(&reminder, &countdown());
        assert!(body.contains("Due Date: Not specified"));
    }

    #[test]
    fn summary_line() {
        let line = format_summary(&sample(), &countdown());
        assert!(line.contains("DBMS (Dbms) - Due tomorrow"));

        let mut done = sample();
        done.complete();
        assert!(format_summary(&done, &countdown()).starts_with("✅"));
    }
}
