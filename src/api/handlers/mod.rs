//! HTTP request handlers.

pub mod health_handler;
pub mod provisioning_handler;

pub use health_handler::health_routes;
pub use provisioning_handler::provisioning_routes;
