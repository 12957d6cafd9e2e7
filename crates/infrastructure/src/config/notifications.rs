//! Notification configuration

use application::NotificationConfig;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use super::default_true;

/// Due-date notification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAppConfig {
    /// Send notifications at all (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds between polls in watch mode (default: 60)
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Width of the "due tomorrow" window in minutes (default: 1440)
    #[serde(default = "default_day_lead_minutes")]
    pub day_lead_minutes: u32,

    /// Width of the "due within the hour" window in minutes (default: 60)
    #[serde(default = "default_hour_lead_minutes")]
    pub hour_lead_minutes: u32,
}

const fn default_poll_interval_secs() -> u64 {
    60
}

const fn default_day_lead_minutes() -> u32 {
    24 * 60
}

const fn default_hour_lead_minutes() -> u32 {
    60
}

impl Default for NotificationAppConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_secs: default_poll_interval_secs(),
            day_lead_minutes: default_day_lead_minutes(),
            hour_lead_minutes: default_hour_lead_minutes(),
        }
    }
}

impl NotificationAppConfig {
    /// Convert to the notification service configuration
    #[must_use]
    pub fn to_service_config(&self) -> NotificationConfig {
        NotificationConfig {
            enabled: self.enabled,
            day_lead: TimeDelta::minutes(i64::from(self.day_lead_minutes)),
            hour_lead: TimeDelta::minutes(i64::from(self.hour_lead_minutes)),
        }
    }
}
