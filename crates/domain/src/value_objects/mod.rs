//! Value Objects - Immutable, identity-less domain primitives

mod confidence;
mod notification_window;
mod reminder_category;
mod reminder_id;
mod urgency;

pub use confidence::Confidence;
pub use notification_window::NotificationWindow;
pub use reminder_category::ReminderCategory;
pub use reminder_id::ReminderId;
pub use urgency::{DueStatus, UrgencyLevel};
