//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod log_notifier;

pub use log_notifier::LogNotifier;
