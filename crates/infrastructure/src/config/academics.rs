//! Academic calculator and storage configuration

use application::DEFAULT_MIN_ATTENDANCE;
use serde::{Deserialize, Serialize};

/// Academic calculator defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicsAppConfig {
    /// Minimum attendance percent used when none is given (default: 75.0)
    #[serde(default = "default_min_attendance")]
    pub min_attendance_percent: f64,
}

const fn default_min_attendance() -> f64 {
    DEFAULT_MIN_ATTENDANCE
}

impl Default for AcademicsAppConfig {
    fn default() -> Self {
        Self {
            min_attendance_percent: default_min_attendance(),
        }
    }
}

/// Where reminders are read from and written back to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageAppConfig {
    /// JSON file holding all stored reminders (default: "reminders.json")
    #[serde(default = "default_reminders_file")]
    pub reminders_file: String,
}

fn default_reminders_file() -> String {
    "reminders.json".to_string()
}

impl Default for StorageAppConfig {
    fn default() -> Self {
        Self {
            reminders_file: default_reminders_file(),
        }
    }
}
