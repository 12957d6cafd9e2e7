//! Property-based tests for domain value objects and entities
//!
//! These tests use proptest to verify invariants across many random inputs.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use domain::{
    NotificationWindow, ReminderCategory, ReminderId, SemesterGrade, StoredReminder,
};
use proptest::prelude::*;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn any_category() -> impl Strategy<Value = ReminderCategory> {
    prop_oneof![
        Just(ReminderCategory::Exam),
        Just(ReminderCategory::Assignment),
        Just(ReminderCategory::Project),
        Just(ReminderCategory::Lab),
    ]
}

// ============================================================================
// NotificationWindow Property Tests
// ============================================================================

mod notification_window_tests {
    use super::*;

    proptest! {
        #[test]
        fn past_due_is_always_overdue(minutes in 1i64..100_000) {
            let now = base();
            let due = now - Duration::minutes(minutes);
            prop_assert_eq!(
                NotificationWindow::for_due(due, now),
                Some(NotificationWindow::Overdue)
            );
        }

        #[test]
        fn window_follows_remaining_time(minutes in 0i64..(3 * 24 * 60)) {
            let now = base();
            let due = now + Duration::minutes(minutes);
            let expected = if minutes <= 60 {
                Some(NotificationWindow::HourBefore)
            } else if minutes <= 24 * 60 {
                Some(NotificationWindow::DayBefore)
            } else {
                None
            };
            prop_assert_eq!(NotificationWindow::for_due(due, now), expected);
        }

        #[test]
        fn serialization_roundtrip(idx in 0usize..3) {
            let window = [
                NotificationWindow::DayBefore,
                NotificationWindow::HourBefore,
                NotificationWindow::Overdue,
            ][idx];
            let json = serde_json::to_string(&window).unwrap();
            let back: NotificationWindow = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(window, back);
        }
    }
}

// ============================================================================
// ReminderCategory Property Tests
// ============================================================================

mod category_tests {
    use super::*;

    proptest! {
        #[test]
        fn serializes_as_lowercase_name(category in any_category()) {
            let json = serde_json::to_value(category).unwrap();
            prop_assert_eq!(json.as_str(), Some(category.as_str()));
        }

        #[test]
        fn appears_once_in_priority_order(category in any_category()) {
            let order = ReminderCategory::priority_order();
            prop_assert_eq!(order.iter().filter(|c| **c == category).count(), 1);
        }
    }
}

// ============================================================================
// StoredReminder Property Tests
// ============================================================================

mod stored_reminder_tests {
    use super::*;

    proptest! {
        #[test]
        fn dedup_key_ignores_case_and_padding(
            title in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]",
            pad in " {0,3}",
            category in any_category()
        ) {
            let a = StoredReminder::new("alice", title.clone(), category, base());
            let b = StoredReminder::new(
                "alice",
                format!("{pad}{}{pad}", title.to_uppercase()),
                category,
                base(),
            );
            prop_assert_eq!(a.dedup_key(), b.dedup_key());
        }

        #[test]
        fn mark_notified_never_duplicates(marks in prop::collection::vec(0usize..3, 0..10)) {
            let windows = [
                NotificationWindow::DayBefore,
                NotificationWindow::HourBefore,
                NotificationWindow::Overdue,
            ];
            let mut reminder = StoredReminder::new("alice", "Quiz", ReminderCategory::Exam, base());
            for idx in &marks {
                reminder.mark_notified(windows[*idx]);
            }
            for window in windows {
                prop_assert!(reminder.notified.iter().filter(|w| **w == window).count() <= 1);
            }
        }

        #[test]
        fn json_roundtrip_preserves_reminder(
            title in "[A-Za-z ]{1,30}",
            category in any_category(),
            offset in 0i64..10_000,
            completed in any::<bool>()
        ) {
            let mut reminder = StoredReminder::new("alice", title, category, base())
                .with_due_at(base() + Duration::minutes(offset));
            if completed {
                reminder.complete();
            }
            let json = serde_json::to_string(&reminder).unwrap();
            let back: StoredReminder = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(reminder, back);
        }
    }
}

// ============================================================================
// ReminderId / SemesterGrade Property Tests
// ============================================================================

mod misc_tests {
    use super::*;

    proptest! {
        #[test]
        fn reminder_id_unique_across_calls(_ in 0..100usize) {
            prop_assert_ne!(ReminderId::new(), ReminderId::new());
        }

        #[test]
        fn positive_semesters_are_countable(sgpa in 0.01f64..10.0, credits in 0.5f64..40.0) {
            prop_assert!(SemesterGrade::new(sgpa, credits).is_countable());
        }

        #[test]
        fn non_positive_semesters_are_skipped(sgpa in -10.0f64..=0.0, credits in 0.5f64..40.0) {
            prop_assert!(!SemesterGrade::new(sgpa, credits).is_countable());
            prop_assert!(!SemesterGrade::new(credits, -sgpa).is_countable());
        }
    }
}
