//! Countdown evaluation - how close a reminder is to its due time

use chrono::{NaiveDateTime, TimeDelta};
use domain::{DueStatus, UrgencyLevel};
use serde::Serialize;

/// Status, urgency and a short countdown text for one reminder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub status: DueStatus,
    pub urgency: UrgencyLevel,
    pub text: String,
}

impl Countdown {
    fn new(status: DueStatus, urgency: UrgencyLevel, text: impl Into<String>) -> Self {
        Self {
            status,
            urgency,
            text: text.into(),
        }
    }

    /// Bucket `due_at` relative to `now`
    #[must_use]
    pub fn evaluate(due_at: Option<NaiveDateTime>, now: NaiveDateTime) -> Self {
        let Some(due_at) = due_at else {
            return Self::new(DueStatus::NoDate, UrgencyLevel::Low, "No due date");
        };

        let remaining = due_at - now;
        let days_apart = (due_at.date() - now.date()).num_days();

        if remaining < TimeDelta::zero() {
            return Self::new(
                DueStatus::Overdue,
                UrgencyLevel::Critical,
                overdue_text(-remaining, days_apart),
            );
        }

        let hours = remaining.num_hours();
        let minutes = remaining.num_minutes() % 60;

        if hours < 1 {
            Self::new(
                DueStatus::DueNow,
                UrgencyLevel::Critical,
                format!("Due in {minutes}m"),
            )
        } else if hours < 3 {
            Self::new(
                DueStatus::DueSoon,
                UrgencyLevel::Urgent,
                format!("Due in {hours}h {minutes}m"),
            )
        } else if days_apart == 0 {
            Self::new(
                DueStatus::DueToday,
                UrgencyLevel::Urgent,
                format!("Due today at {}", due_at.format("%H:%M")),
            )
        } else if days_apart == 1 {
            Self::new(DueStatus::DueTomorrow, UrgencyLevel::High, "Due tomorrow")
        } else if days_apart <= 7 {
            Self::new(
                DueStatus::Upcoming,
                UrgencyLevel::Medium,
                format!("{days_apart} days left"),
            )
        } else {
            Self::new(
                DueStatus::Upcoming,
                UrgencyLevel::Low,
                format!("{days_apart} days left"),
            )
        }
    }
}

fn overdue_text(overdue: TimeDelta, days_apart: i64) -> String {
    let hours = overdue.num_hours();
    let minutes = overdue.num_minutes() % 60;

    if days_apart < -1 {
        format!("{} days overdue", days_apart.abs())
    } else if hours >= 24 {
        format!("{} days overdue", hours / 24)
    } else if hours > 0 {
        format!("Overdue by {hours}h {minutes}m")
    } else {
        format!("Overdue by {minutes}m")
    }
}
