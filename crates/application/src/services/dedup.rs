//! Duplicate detection for stored reminders
//!
//! Two reminders are duplicates when their normalised title, category and
//! due time agree (see [`StoredReminder::dedup_key`]).

use std::collections::HashSet;

use domain::StoredReminder;
use tracing::debug;

/// Check whether `candidate` duplicates any of `existing`
#[must_use]
pub fn is_duplicate(candidate: &StoredReminder, existing: &[StoredReminder]) -> bool {
    let key = candidate.dedup_key();
    existing.iter().any(|reminder| reminder.dedup_key() == key)
}

/// Drop later duplicates, keeping the first occurrence and the input order
#[must_use]
pub fn remove_duplicates(reminders: Vec<StoredReminder>) -> Vec<StoredReminder> {
    let total = reminders.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<_> = reminders
        .into_iter()
        .filter(|reminder| {
            let fresh = seen.insert(reminder.dedup_key());
            if !fresh {
                debug!(title = %reminder.title, category = %reminder.category, "Dropping duplicate reminder");
            }
            fresh
        })
        .collect();

    if unique.len() < total {
        debug!(removed = total - unique.len(), "Removed duplicate reminders");
    }
    unique
}
