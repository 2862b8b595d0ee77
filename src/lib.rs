//! Tenant Provisioner - Per-tenant identity infrastructure
//!
//! For each new tenant this crate creates an isolated user pool, a hosted
//! login domain derived from the pool name, and a "Dashboard" OAuth client,
//! against an injected identity provider (AWS Cognito in production).
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Requests, domain prefix, resource specs, result
//! - **services**: The provisioning workflow
//! - **infra**: Identity-provider capability and Cognito adapter
//! - **api**: HTTP handlers and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Provision one tenant
//! cargo run -- provision --name "Acme Corp" --callback-url https://app.acme.test/cb
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{DomainPrefix, ProvisioningRequest, ProvisioningResult};
pub use errors::{AppError, AppResult};
