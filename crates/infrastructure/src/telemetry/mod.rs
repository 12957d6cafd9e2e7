//! Logging initialisation
//!
//! Installs a global `tracing` subscriber with an `EnvFilter` and a plain
//! or JSON `fmt` layer.

mod logging;

pub use logging::{LoggingError, init_logging};
