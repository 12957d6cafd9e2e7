//! Notification windows for due-date alerts

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Firing window for a reminder notification
///
/// A reminder is notified at most once per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationWindow {
    /// Due within the next 24 hours
    DayBefore,
    /// Due within the next hour
    HourBefore,
    /// Due time has passed
    Overdue,
}

impl NotificationWindow {
    /// Pick the tightest window that applies to `due_at` as seen from `now`
    ///
    /// `day_lead` and `hour_lead` are the widths of the two advance windows.
    /// Returns `None` when the reminder is further out than `day_lead`.
    #[must_use]
    pub fn for_due_with_leads(
        due_at: NaiveDateTime,
        now: NaiveDateTime,
        day_lead: Duration,
        hour_lead: Duration,
    ) -> Option<Self> {
        let remaining = due_at - now;
        if remaining < Duration::zero() {
            Some(Self::Overdue)
        } else if remaining <= hour_lead {
            Some(Self::HourBefore)
        } else if remaining <= day_lead {
            Some(Self::DayBefore)
        } else {
            None
        }
    }

    /// Same as [`Self::for_due_with_leads`] with the standard 24h / 1h leads
    #[must_use]
    pub fn for_due(due_at: NaiveDateTime, now: NaiveDateTime) -> Option<Self> {
        Self::for_due_with_leads(due_at, now, Duration::hours(24), Duration::hours(1))
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::DayBefore => "due within 24 hours",
            Self::HourBefore => "due within 1 hour",
            Self::Overdue => "overdue",
        }
    }
}

impl fmt::Display for NotificationWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn overdue_when_past() {
        assert_eq!(
            NotificationWindow::for_due(at(9, 0), at(9, 1)),
            Some(NotificationWindow::Overdue)
        );
    }

    #[test]
    fn hour_before_inclusive() {
        assert_eq!(
            NotificationWindow::for_due(at(10, 0), at(9, 0)),
            Some(NotificationWindow::HourBefore)
        );
        assert_eq!(
            NotificationWindow::for_due(at(9, 0), at(9, 0)),
            Some(NotificationWindow::HourBefore)
        );
    }

    #[test]
    fn day_before() {
        assert_eq!(
            NotificationWindow::for_due(at(23, 0), at(9, 0)),
            Some(NotificationWindow::DayBefore)
        );
    }

    #[test]
    fn none_when_far_out() {
        let far = at(9, 0) + Duration::days(3);
        assert_eq!(NotificationWindow::for_due(far, at(9, 0)), None);
    }
}
