//! Reminder store port
//!
//! Defines the interface for persisting a user's reminders. The application
//! never assumes a particular backend; the infrastructure layer ships an
//! in-memory adapter that can be seeded from a JSON file.

use async_trait::async_trait;
use domain::{ReminderId, StoredReminder};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for reminder persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReminderStorePort: Send + Sync {
    /// All reminders owned by `owner`, in insertion order
    async fn list(&self, owner: &str) -> Result<Vec<StoredReminder>, ApplicationError>;

    /// Get a single reminder
    async fn get(
        &self,
        owner: &str,
        id: &ReminderId,
    ) -> Result<Option<StoredReminder>, ApplicationError>;

    /// Insert a reminder or replace the one with the same ID
    async fn save(&self, reminder: &StoredReminder) -> Result<(), ApplicationError>;

    /// Delete a reminder, returning whether it existed
    async fn delete(&self, owner: &str, id: &ReminderId) -> Result<bool, ApplicationError>;

    /// Every owner with at least one reminder
    async fn owners(&self) -> Result<Vec<String>, ApplicationError>;
}
