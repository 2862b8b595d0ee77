//! Identity-provider capability consumed by the provisioning workflow.
//!
//! The provider is the sole system of record for pools, domains and
//! clients; this crate only ever talks to it through this trait.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{OAuthClientSpec, PoolDomainSpec, UserPoolSpec};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Coarse classification of provider failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Resource already exists (e.g. a domain prefix owned by another pool)
    Conflict,
    /// Request was throttled or a quota was hit
    Throttled,
    /// Referenced resource does not exist
    NotFound,
    /// Provider rejected a parameter
    InvalidParameter,
    Other,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProviderErrorKind::Conflict => "conflict",
            ProviderErrorKind::Throttled => "throttled",
            ProviderErrorKind::NotFound => "not found",
            ProviderErrorKind::InvalidParameter => "invalid parameter",
            ProviderErrorKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// Failure reported by the identity provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "identity provider error ({kind}, code {}): {message}",
    .code.as_deref().unwrap_or("unknown")
)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    /// Provider-specific error code, when one was reported
    pub code: Option<String>,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Result type for provider calls
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Identity-provider operations used to provision and (optionally) clean up a tenant.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a user pool and return its identifier
    async fn create_user_pool(&self, spec: &UserPoolSpec) -> ProviderResult<String>;

    /// Bind a hosted domain prefix to a pool
    async fn create_domain(&self, spec: &PoolDomainSpec) -> ProviderResult<()>;

    /// Register an OAuth client in a pool and return its identifier
    async fn create_oauth_client(&self, spec: &OAuthClientSpec) -> ProviderResult<String>;

    /// Delete a user pool
    async fn delete_user_pool(&self, pool_id: &str) -> ProviderResult<()>;

    /// Remove a hosted domain from a pool
    async fn delete_domain(&self, spec: &PoolDomainSpec) -> ProviderResult<()>;

    /// Delete an OAuth client
    async fn delete_oauth_client(&self, pool_id: &str, client_id: &str) -> ProviderResult<()>;
}
