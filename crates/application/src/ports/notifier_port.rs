//! Notifier port
//!
//! Delivery channel for due-date notifications (e-mail, push, log).

use async_trait::async_trait;
use domain::{NotificationWindow, ReminderId};
#[cfg(test)]
use mockall::automock;
use serde::Serialize;

use crate::error::ApplicationError;

/// A notification ready to be delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderNotification {
    /// Recipient username
    pub owner: String,
    /// Reminder that triggered it
    pub reminder_id: ReminderId,
    /// Which lead window fired
    pub window: NotificationWindow,
    /// One-line subject
    pub subject: String,
    /// Message body
    pub body: String,
}

/// Port for delivering notifications
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotifierPort: Send + Sync {
    /// Deliver one notification
    async fn notify(&self, notification: &ReminderNotification) -> Result<(), ApplicationError>;
}
