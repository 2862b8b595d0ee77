//! Domain layer - Core provisioning concepts
//!
//! Requests, the derived domain prefix, the resource specs handed to the
//! identity provider, and the final result. Nothing here performs I/O.

pub mod prefix;
pub mod request;
pub mod resources;
pub mod result;

pub use prefix::{is_valid_namespace, DomainPrefix};
pub use request::{CreateAccountRequest, CreatePoolRequest, ProvisioningRequest, Variant};
pub use resources::{OAuthClientSpec, OAuthFlow, PoolDomainSpec, ProvisioningStep, UserPoolSpec};
pub use result::ProvisioningResult;
