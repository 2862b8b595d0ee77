//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `provision` - Provision one tenant from the command line

pub mod args;

pub use args::{Cli, Commands, ProvisionArgs, ServeArgs};
