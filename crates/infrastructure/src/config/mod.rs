//! Application configuration
//!
//! Split into focused sub-modules by concern:
//! - `logging`: log filter and output format
//! - `notifications`: due-date notification polling and lead windows
//! - `academics`: calculator defaults and reminder storage location

mod academics;
mod logging;
mod notifications;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use academics::{AcademicsAppConfig, StorageAppConfig};
pub use logging::LoggingConfig;
pub use notifications::NotificationAppConfig;

/// Prefix for environment overrides, e.g. `STUDYPAL_LOGGING__JSON=true`
pub const ENV_PREFIX: &str = "STUDYPAL";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - human-readable logs
    #[default]
    Development,
    /// Production environment
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Environment,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Notification configuration
    #[serde(default)]
    pub notifications: NotificationAppConfig,

    /// Academic calculator defaults
    #[serde(default)]
    pub academics: AcademicsAppConfig,

    /// Reminder storage
    #[serde(default)]
    pub storage: StorageAppConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_sources(
            config::File::with_name("config").required(false),
            Self::env_source(),
        )
    }

    /// Load configuration from an explicit file plus environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::from_sources(config::File::from(path.as_ref()), Self::env_source())
    }

    /// Environment source; `__` separates nested keys so that field names
    /// may keep their underscores
    fn env_source() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn from_sources<F>(file: F, env: config::Environment) -> Result<Self, config::ConfigError>
    where
        F: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            // Start with defaults
            .set_default("logging.filter", LoggingConfig::default().filter)?
            .set_default("notifications.poll_interval_secs", 60)?
            // Load from file
            .add_source(file)
            // Override with environment variables
            .add_source(env)
            .build()?
            .try_deserialize::<Self>()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the services cannot work with
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let min = self.academics.min_attendance_percent;
        if !(min > 0.0 && min <= 100.0) {
            return Err(config::ConfigError::Message(format!(
                "academics.min_attendance_percent must be within (0, 100], got {min}"
            )));
        }
        if self.notifications.hour_lead_minutes >= self.notifications.day_lead_minutes {
            return Err(config::ConfigError::Message(
                "notifications.hour_lead_minutes must be shorter than day_lead_minutes"
                    .to_string(),
            ));
        }
        if self.notifications.poll_interval_secs == 0 {
            return Err(config::ConfigError::Message(
                "notifications.poll_interval_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
