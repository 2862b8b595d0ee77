//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - The identity-provider capability and its error type
//! - The AWS Cognito adapter implementing it

pub mod cognito;
pub mod identity_provider;

pub use cognito::CognitoIdentityProvider;
pub use identity_provider::{IdentityProvider, ProviderError, ProviderErrorKind, ProviderResult};

#[cfg(any(test, feature = "test-utils"))]
pub use identity_provider::MockIdentityProvider;
