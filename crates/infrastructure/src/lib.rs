//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and owns the process
//! plumbing: configuration loading and logging initialisation.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::LogNotifier;
pub use config::{
    AcademicsAppConfig, AppConfig, Environment, LoggingConfig, NotificationAppConfig,
    StorageAppConfig,
};
pub use persistence::InMemoryReminderStore;
pub use telemetry::{LoggingError, init_logging};
