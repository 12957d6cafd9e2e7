//! Domain layer for StudyPal
//!
//! Contains the reminder and academic-record entities, value objects, and
//! domain errors. This layer performs no I/O and defines the ubiquitous
//! language shared by the parser, services, and adapters.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
