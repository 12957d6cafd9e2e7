//! Application layer - Use cases and orchestration
//!
//! Contains the reminder parser, the academic calculators, and the services
//! that drive reminder storage and notification through ports. Adapters in
//! the infrastructure layer implement those ports.

pub mod error;
pub mod ports;
pub mod reminder_parser;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use reminder_parser::{ReminderParser, parse};
pub use services::*;
