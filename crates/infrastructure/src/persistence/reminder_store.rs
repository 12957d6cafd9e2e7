//! In-memory reminder persistence with JSON file snapshots

use std::collections::BTreeMap;
use std::path::Path;

use application::{error::ApplicationError, ports::ReminderStorePort};
use async_trait::async_trait;
use domain::{ReminderId, StoredReminder};
use parking_lot::RwLock;
use tracing::{debug, info, instrument};

/// Reminder store keyed by owner
///
/// Each owner's reminders keep their insertion order. Snapshots are a flat
/// JSON array of [`StoredReminder`] documents.
#[derive(Debug, Default)]
pub struct InMemoryReminderStore {
    reminders: RwLock<BTreeMap<String, Vec<StoredReminder>>>,
}

impl InMemoryReminderStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `reminders`
    #[must_use]
    pub fn from_reminders(reminders: impl IntoIterator<Item = StoredReminder>) -> Self {
        let mut by_owner: BTreeMap<String, Vec<StoredReminder>> = BTreeMap::new();
        for reminder in reminders {
            by_owner
                .entry(reminder.owner.clone())
                .or_default()
                .push(reminder);
        }
        Self {
            reminders: RwLock::new(by_owner),
        }
    }

    /// Load a snapshot; a missing file yields an empty store
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Storage` if the file cannot be read or is
    /// not a valid snapshot.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, ApplicationError> {
        let path = path.as_ref();
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No reminder file, starting empty");
                return Ok(Self::new());
            },
            Err(e) => {
                return Err(ApplicationError::Storage(format!(
                    "Failed to read {}: {e}",
                    path.display()
                )));
            },
        };

        let reminders: Vec<StoredReminder> = serde_json::from_str(&contents).map_err(|e| {
            ApplicationError::Storage(format!("Invalid reminder file {}: {e}", path.display()))
        })?;

        info!(count = reminders.len(), "Loaded reminders");
        Ok(Self::from_reminders(reminders))
    }

    /// Write a snapshot of every reminder
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Storage` if the file cannot be written.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ApplicationError> {
        let path = path.as_ref();
        let snapshot = self.snapshot();
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| ApplicationError::Internal(format!("Serialization failed: {e}")))?;

        tokio::fs::write(path, json).await.map_err(|e| {
            ApplicationError::Storage(format!("Failed to write {}: {e}", path.display()))
        })?;

        debug!(count = snapshot.len(), "Saved reminders");
        Ok(())
    }

    /// Every stored reminder, grouped by owner
    #[must_use]
    pub fn snapshot(&self) -> Vec<StoredReminder> {
        self.reminders.read().values().flatten().cloned().collect()
    }

    /// Number of stored reminders
    #[must_use]
    pub fn len(&self) -> usize {
        self.reminders.read().values().map(Vec::len).sum()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReminderStorePort for InMemoryReminderStore {
    async fn list(&self, owner: &str) -> Result<Vec<StoredReminder>, ApplicationError> {
        Ok(self.reminders.read().get(owner).cloned().unwrap_or_default())
    }

    async fn get(
        &self,
        owner: &str,
        id: &ReminderId,
    ) -> Result<Option<StoredReminder>, ApplicationError> {
        Ok(self
            .reminders
            .read()
            .get(owner)
            .and_then(|list| list.iter().find(|r| r.id == *id).cloned()))
    }

    #[instrument(skip(self, reminder), fields(reminder_id = %reminder.id))]
    async fn save(&self, reminder: &StoredReminder) -> Result<(), ApplicationError> {
        let mut reminders = self.reminders.write();
        let list = reminders.entry(reminder.owner.clone()).or_default();
        match list.iter_mut().find(|r| r.id == reminder.id) {
            Some(existing) => *existing = reminder.clone(),
            None => list.push(reminder.clone()),
        }
        Ok(())
    }

    async fn delete(&self, owner: &str, id: &ReminderId) -> Result<bool, ApplicationError> {
        let mut reminders = self.reminders.write();
        let Some(list) = reminders.get_mut(owner) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|r| r.id != *id);
        let removed = list.len() < before;
        if list.is_empty() {
            reminders.remove(owner);
        }
        Ok(removed)
    }

    async fn owners(&self) -> Result<Vec<String>, ApplicationError> {
        Ok(self.reminders.read().keys().cloned().collect())
    }
}
