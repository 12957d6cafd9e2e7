//! Notifier that writes notifications to the log
//!
//! Stands in for a mail or push channel; every delivery becomes one
//! structured `info!` event.

use std::sync::atomic::{AtomicUsize, Ordering};

use application::{
    error::ApplicationError,
    ports::{NotifierPort, ReminderNotification},
};
use async_trait::async_trait;
use tracing::{info, instrument};

/// Notifier backed by `tracing`
#[derive(Debug, Default)]
pub struct LogNotifier {
    delivered: AtomicUsize,
}

impl LogNotifier {
    /// Create a new log notifier
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications delivered so far
    #[must_use]
    pub fn delivered(&self) -> usize {
        self.delivered.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl NotifierPort for LogNotifier {
    #[instrument(skip(self, notification), fields(reminder_id = %notification.reminder_id))]
    async fn notify(&self, notification: &ReminderNotification) -> Result<(), ApplicationError> {
        info!(
            owner = %notification.owner,
            window = %notification.window,
            subject = %notification.subject,
            body = %notification.body,
            "Reminder notification"
        );
        self.delivered.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
