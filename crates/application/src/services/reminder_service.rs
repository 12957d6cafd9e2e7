//! Reminder service
//!
//! Business logic for a user's reminders: creation from pasted text,
//! duplicate rejection, listing with countdowns, completion and cleanup.

use std::{fmt, sync::Arc};

use chrono::NaiveDateTime;
use domain::{DomainError, ReminderId, StoredReminder};
use serde::Serialize;
use tracing::{debug, info, instrument};

use super::countdown::Countdown;
use super::dedup;
use crate::{error::ApplicationError, ports::ReminderStorePort, reminder_parser};

/// A reminder together with its countdown at a given instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderOverview {
    pub reminder: StoredReminder,
    pub countdown: Countdown,
}

/// Service for managing reminders
pub struct ReminderService<S: ReminderStorePort> {
    store: Arc<S>,
}

impl<S: ReminderStorePort> fmt::Debug for ReminderService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReminderService").finish_non_exhaustive()
    }
}

impl<S: ReminderStorePort> Clone for ReminderService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ReminderStorePort> ReminderService<S> {
    /// Create a new reminder service
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Parse `text` and store the result for `owner`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Duplicate` (wrapped) if an equivalent reminder
    /// already exists, or a storage error from the port.
    #[instrument(skip(self, text))]
    pub async fn add_from_text(
        &self,
        owner: &str,
        text: &str,
        now: NaiveDateTime,
    ) -> Result<StoredReminder, ApplicationError> {
        let parsed = reminder_parser::parse(text, now);
        let reminder = StoredReminder::from_parsed(owner, &parsed, now);
        self.add(reminder).await
    }

    /// Store a reminder unless an equivalent one exists
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Duplicate` (wrapped) on a duplicate, or a
    /// storage error from the port.
    #[instrument(skip(self, reminder), fields(title = %reminder.title))]
    pub async fn add(&self, reminder: StoredReminder) -> Result<StoredReminder, ApplicationError> {
        let existing = self.store.list(&reminder.owner).await?;
        if dedup::is_duplicate(&reminder, &existing) {
            debug!(owner = %reminder.owner, "Rejecting duplicate reminder");
            return Err(DomainError::duplicate("reminder", reminder.title).into());
        }

        self.store.save(&reminder).await?;
        info!(id = %reminder.id, category = %reminder.category, "Reminder created");
        Ok(reminder)
    }

    /// All reminders of `owner` with countdowns, open ones first by due time
    ///
    /// # Errors
    ///
    /// Returns a storage error from the port.
    #[instrument(skip(self))]
    pub async fn overview(
        &self,
        owner: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<ReminderOverview>, ApplicationError> {
        let mut reminders = self.store.list(owner).await?;
        reminders.sort_by_key(|r| (r.completed, r.due_at.is_none(), r.due_at));

        Ok(reminders
            .into_iter()
            .map(|reminder| ReminderOverview {
                countdown: Countdown::evaluate(reminder.due_at, now),
                reminder,
            })
            .collect())
    }

    /// Mark a reminder as done
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` (wrapped) if the reminder does not
    /// exist, or a storage error from the port.
    #[instrument(skip(self))]
    pub async fn complete(
        &self,
        owner: &str,
        id: &ReminderId,
    ) -> Result<StoredReminder, ApplicationError> {
        let mut reminder = self
            .store
            .get(owner, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reminder", id.to_string()))?;

        reminder.complete();
        self.store.save(&reminder).await?;
        info!(id = %id, "Reminder completed");
        Ok(reminder)
    }

    /// Delete a reminder
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` (wrapped) if the reminder does not
    /// exist, or a storage error from the port.
    #[instrument(skip(self))]
    pub async fn delete(&self, owner: &str, id: &ReminderId) -> Result<(), ApplicationError> {
        if self.store.delete(owner, id).await? {
            info!(id = %id, "Reminder deleted");
            Ok(())
        } else {
            Err(DomainError::not_found("Reminder", id.to_string()).into())
        }
    }

    /// Delete stored duplicates of `owner`, keeping the first of each
    ///
    /// # Errors
    ///
    /// Returns a storage error from the port.
    #[instrument(skip(self))]
    pub async fn remove_duplicates(&self, owner: &str) -> Result<usize, ApplicationError> {
        let all = self.store.list(owner).await?;
        let kept: Vec<ReminderId> = dedup::remove_duplicates(all.clone())
            .into_iter()
            .map(|r| r.id)
            .collect();

        let mut removed = 0;
        for reminder in all.iter().filter(|r| !kept.contains(&r.id)) {
            if self.store.delete(owner, &reminder.id).await? {
                removed += 1;
            }
        }

        if removed > 0 {
            info!(removed, "Removed duplicate reminders");
        }
        Ok(removed)
    }
}
