//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT};

/// Tenant Provisioner - Per-tenant identity pool provisioning
#[derive(Parser, Debug)]
#[command(name = "tenant-provisioner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Provision a single tenant and print the result
    Provision(ProvisionArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = DEFAULT_SERVER_HOST, env = "SERVER_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_SERVER_PORT, env = "SERVER_PORT")]
    pub port: u16,
}

/// Arguments for the provision command
#[derive(Parser, Debug)]
pub struct ProvisionArgs {
    /// User pool name
    #[arg(short, long)]
    pub name: String,

    /// OAuth callback URL; omit to create a bare pool with the default callback
    #[arg(short, long)]
    pub callback_url: Option<String>,
}
