//! Application services - Use case implementations

pub mod academic_calculator;
mod countdown;
pub mod dedup;
mod notification_service;
pub mod reminder_formatter;
mod reminder_service;

pub use academic_calculator::{DEFAULT_MIN_ATTENDANCE, calculate_attendance, calculate_cgpa};
pub use countdown::Countdown;
pub use notification_service::{NotificationConfig, NotificationService};
pub use reminder_service::{ReminderOverview, ReminderService};
