//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod notifier_port;
mod reminder_store;

#[cfg(test)]
pub use notifier_port::MockNotifierPort;
pub use notifier_port::{NotifierPort, ReminderNotification};
#[cfg(test)]
pub use reminder_store::MockReminderStorePort;
pub use reminder_store::ReminderStorePort;
