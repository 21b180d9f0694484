//! CLI Module
//!
//! Argument parsing, command handlers and console output for the semtrace
//! binary.

pub mod args;
pub mod commands;
pub mod output;

pub use args::*;
pub use commands::*;
