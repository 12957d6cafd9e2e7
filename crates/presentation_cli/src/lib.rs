//! StudyPal command-line interface
//!
//! Argument definitions live in [`cli`]; [`commands`] runs them against the
//! application services and renders the output.

pub mod cli;
pub mod commands;
