//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `check` - Validate the configuration without serving
//! - `send-test-email` - Verify mail delivery

pub mod args;

pub use args::{Cli, Commands};
