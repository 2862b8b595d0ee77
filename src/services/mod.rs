//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on the identity-provider trait,
//! never on a concrete adapter.

mod provisioning_service;

pub use provisioning_service::{ProvisioningService, Provisioner};
