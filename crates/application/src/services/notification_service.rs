//! Notification service for due-date alerts
//!
//! Polls a user's open reminders, decides which lead window applies, and
//! hands formatted notifications to the notifier. Each window fires at most
//! once per reminder; the store records which windows already went out.

use std::sync::Arc;

use chrono::{NaiveDateTime, TimeDelta};
use domain::{NotificationWindow, StoredReminder};
use tracing::{debug, error, info, instrument, warn};

use super::countdown::Countdown;
use super::reminder_formatter;
use crate::error::ApplicationError;
use crate::ports::{NotifierPort, ReminderNotification, ReminderStorePort};

/// Configuration for the notification service
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// Whether notifications are sent at all
    pub enabled: bool,
    /// Width of the "due tomorrow" window
    pub day_lead: TimeDelta,
    /// Width of the "due within the hour" window
    pub hour_lead: TimeDelta,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            day_lead: TimeDelta::hours(24),
            hour_lead: TimeDelta::hours(1),
        }
    }
}

/// Service that turns due reminders into notifications
pub struct NotificationService<S: ReminderStorePort, N: NotifierPort> {
    store: Arc<S>,
    notifier: Arc<N>,
    config: NotificationConfig,
}

impl<S: ReminderStorePort, N: NotifierPort> std::fmt::Debug for NotificationService<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S: ReminderStorePort, N: NotifierPort> NotificationService<S, N> {
    /// Create a new notification service
    #[must_use]
    pub const fn new(store: Arc<S>, notifier: Arc<N>, config: NotificationConfig) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    /// Window that should fire for `reminder` now, if any
    fn pending_window(
        &self,
        reminder: &StoredReminder,
        now: NaiveDateTime,
    ) -> Option<NotificationWindow> {
        if reminder.completed {
            return None;
        }
        let due_at = reminder.due_at?;
        let window = NotificationWindow::for_due_with_leads(
            due_at,
            now,
            self.config.day_lead,
            self.config.hour_lead,
        )?;
        (!reminder.was_notified(window)).then_some(window)
    }

    fn build(
        reminder: &StoredReminder,
        window: NotificationWindow,
        now: NaiveDateTime,
    ) -> ReminderNotification {
        let countdown = Countdown::evaluate(reminder.due_at, now);
        ReminderNotification {
            owner: reminder.owner.clone(),
            reminder_id: reminder.id,
            window,
            subject: reminder_formatter::format_subject(reminder, window),
            body: reminder_formatter::format_body(reminder, &countdown),
        }
    }

    /// Send pending notifications for one user
    ///
    /// Delivery failures are logged and skipped so one bad reminder does not
    /// block the rest; the window stays unmarked and is retried next poll.
    ///
    /// Delivery is at least once. A notification that was delivered but
    /// could not be recorded is still returned as sent, and the next poll
    /// sends it again.
    ///
    /// # Errors
    ///
    /// Returns an error if the reminders cannot be listed.
    #[instrument(skip(self))]
    pub async fn poll(
        &self,
        owner: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<ReminderNotification>, ApplicationError> {
        if !self.config.enabled {
            debug!("Notifications disabled");
            return Ok(Vec::new());
        }

        let reminders = self.store.list(owner).await?;
        let mut sent = Vec::new();

        for mut reminder in reminders {
            let Some(window) = self.pending_window(&reminder, now) else {
                continue;
            };

            let notification = Self::build(&reminder, window, now);
            if let Err(e) = self.notifier.notify(&notification).await {
                warn!(reminder_id = %reminder.id, error = %e, "Failed to deliver notification");
                continue;
            }

            reminder.mark_notified(window);
            if let Err(e) = self.store.save(&reminder).await {
                error!(
                    reminder_id = %reminder.id,
                    window = %window,
                    error = %e,
                    "Failed to record sent notification, it will be sent again"
                );
            }
            sent.push(notification);
        }

        if !sent.is_empty() {
            info!(count = sent.len(), "Sent reminder notifications");
        }
        Ok(sent)
    }

    /// Send pending notifications for every user in the store
    ///
    /// # Errors
    ///
    /// Returns an error if the owners cannot be listed. Per-user failures
    /// are logged and skipped.
    #[instrument(skip(self))]
    pub async fn poll_all(
        &self,
        now: NaiveDateTime,
    ) -> Result<Vec<ReminderNotification>, ApplicationError> {
        let mut all = Vec::new();
        for owner in self.store.owners().await? {
            match self.poll(&owner, now).await {
                Ok(sent) => all.extend(sent),
                Err(e) => error!(owner = %owner, error = %e, "Failed to poll reminders"),
            }
        }
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use domain::ReminderCategory;

    use super::*;
    use crate::ports::{MockNotifierPort, MockReminderStorePort};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn due_in(title: &str, delta: TimeDelta) -> StoredReminder {
        StoredReminder::new("alice", title, ReminderCategory::Exam, now()).with_due_at(now() + delta)
    }

    fn service(
        store: MockReminderStorePort,
        notifier: MockNotifierPort,
    ) -> NotificationService<MockReminderStorePort, MockNotifierPort> {
        NotificationService::new(
            Arc::new(store),
            Arc::new(notifier),
            NotificationConfig::default(),
        )
    }

    #[tokio::test]
    async fn notifies_each_window_once() {
        let list = vec![
            due_in("Soon", TimeDelta::minutes(30)),
            due_in("Tomorrow", TimeDelta::hours(20)),
            due_in("Late", TimeDelta::hours(-2)),
            due_in("Far", TimeDelta::days(5)),
        ];

        let mut store = MockReminderStorePort::new();
        store.expect_list().returning(move |_| Ok(list.clone()));
        store
            .expect_save()
            .withf(|r| r.notified.len() == 1)
            .times(3)
            .returning(|_| Ok(()));

        let mut notifier = MockNotifierPort::new();
        notifier.expect_notify().times(3).returning(|_| Ok(()));

        let sent = service(store, notifier).poll("alice", now()).await.unwrap();
        let windows: Vec<_> = sent.iter().map(|n| n.window).collect();
        assert_eq!(
            windows,
            vec![
                NotificationWindow::HourBefore,
                NotificationWindow::DayBefore,
                NotificationWindow::Overdue,
            ]
        );
        assert!(sent[2].subject.contains("Overdue: Late"));
        assert!(sent[2].body.contains("Status: Overdue by 2h 0m"));
    }

    #[tokio::test]
    async fn skips_completed_undated_and_already_sent() {
        let mut done = due_in("Done", TimeDelta::minutes(30));
        done.complete();
        let undated = StoredReminder::new("alice", "Someday", ReminderCategory::Project, now());
        let mut sent_before = due_in("Sent", TimeDelta::minutes(30));
        sent_before.mark_notified(NotificationWindow::HourBefore);
        let list = vec![done, undated, sent_before];

        let mut store = MockReminderStorePort::new();
        store.expect_list().returning(move |_| Ok(list.clone()));
        store.expect_save().never();

        let mut notifier = MockNotifierPort::new();
        notifier.expect_notify().never();

        let sent = service(store, notifier).poll("alice", now()).await.unwrap();
        assert!(sent.is_empty());
    }

    #[tokio::test]
    async fn delivery_failure_leaves_window_unmarked() {
        let list = vec![due_in("Soon", TimeDelta::minutes(30))];

        let mut store = MockReminderStorePort::new();
        store.expect_list().returning(move |_| Ok(list.clone()));
        store.expect_save().never();

        let mut notifier = MockNotifierPort::new();
        notifier
            .expect_notify()
            .returning(|_| Err(ApplicationError::Notification("smtp down".to_string())));

        let sent = service(store, notifier).poll("alice", now()).await.unwrap();
        assert!(sent.is_empty());
    }

    #[tokio::test]
    async fn unrecorded_delivery_is_sent_again() {
        let list = vec![due_in("Soon", TimeDelta::minutes(30))];

        let mut store = MockReminderStorePort::new();
        store.expect_list().times(2).returning(move |_| Ok(list.clone()));
        store
            .expect_save()
            .times(2)
            .returning(|_| Err(ApplicationError::Storage("disk full".to_string())));

        let mut notifier = MockNotifierPort::new();
        notifier.expect_notify().times(2).returning(|_| Ok(()));

        let service = service(store, notifier);
        let first = service.poll("alice", now()).await.unwrap();
        let second = service.poll("alice", now()).await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].window, NotificationWindow::HourBefore);
    }

    #[tokio::test]
    async fn disabled_does_nothing() {
        let mut store = MockReminderStorePort::new();
        store.expect_list().never();
        let notifier = MockNotifierPort::new();

        let config = NotificationConfig {
            enabled: false,
            ..NotificationConfig::default()
        };
        let service = NotificationService::new(Arc::new(store), Arc::new(notifier), config);
        assert!(service.poll("alice", now()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn poll_all_covers_every_owner() {
        let mut store = MockReminderStorePort::new();
        store
            .expect_owners()
            .returning(|| Ok(vec!["alice".to_string(), "bob".to_string()]));
        store.expect_list().times(2).returning(|owner| {
            let mut reminder = due_in("Quiz", TimeDelta::minutes(10));
            reminder.owner = owner.to_string();
            Ok(vec![reminder])
        });
        store.expect_save().times(2).returning(|_| Ok(()));

        let mut notifier = MockNotifierPort::new();
        notifier.expect_notify().times(2).returning(|_| Ok(()));

        let sent = service(store, notifier).poll_all(now()).await.unwrap();
        let owners: Vec<_> = sent.iter().map(|n| n.owner.as_str()).collect();
        assert_eq!(owners, vec!["alice", "bob"]);
    }

    #[test]
    fn default_config() {
        let config = NotificationConfig::default();
        assert!(config.enabled);
        assert_eq!(config.day_lead, TimeDelta::hours(24));
        assert_eq!(config.hour_lead, TimeDelta::hours(1));
    }
}
