//! Persistence module
//!
//! In-memory reminder storage that can be seeded from and flushed to a JSON
//! file.

pub mod reminder_store;

pub use reminder_store::InMemoryReminderStore;
