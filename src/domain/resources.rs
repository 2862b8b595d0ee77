//! Value objects describing the identity-provider resources a tenant gets.

use std::fmt;

use super::DomainPrefix;
use crate::config::{ProvisioningSettings, EMAIL_ATTRIBUTE, POOL_IDENTITY_PROVIDER};

/// OAuth flows a client may be allowed to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthFlow {
    AuthorizationCode,
    Implicit,
    ClientCredentials,
}

impl OAuthFlow {
    /// Wire name used by the identity provider
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthFlow::AuthorizationCode => "code",
            OAuthFlow::Implicit => "implicit",
            OAuthFlow::ClientCredentials => "client_credentials",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "code" => Some(OAuthFlow::AuthorizationCode),
            "implicit" => Some(OAuthFlow::Implicit),
            "client_credentials" => Some(OAuthFlow::ClientCredentials),
            _ => None,
        }
    }
}

impl std::str::FromStr for OAuthFlow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s.trim()).ok_or_else(|| format!("unknown OAuth flow: {}", s))
    }
}

impl fmt::Display for OAuthFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The steps of the provisioning workflow, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningStep {
    CreatePool,
    CreateDomain,
    CreateClient,
}

impl fmt::Display for ProvisioningStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisioningStep::CreatePool => f.write_str("create pool"),
            ProvisioningStep::CreateDomain => f.write_str("create domain"),
            ProvisioningStep::CreateClient => f.write_str("create client"),
        }
    }
}

/// User pool to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPoolSpec {
    pub name: String,
    /// Users may sign themselves up (administrators are not required to create them)
    pub self_signup_enabled: bool,
    pub username_attributes: Vec<String>,
    pub auto_verified_attributes: Vec<String>,
}

impl UserPoolSpec {
    /// Self-service pool where the email address is both login and verified attribute.
    pub fn self_service(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            self_signup_enabled: true,
            username_attributes: vec![EMAIL_ATTRIBUTE.to_string()],
            auto_verified_attributes: vec![EMAIL_ATTRIBUTE.to_string()],
        }
    }
}

/// Hosted domain binding a prefix to a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolDomainSpec {
    pub prefix: DomainPrefix,
    pub pool_id: String,
}

/// OAuth client to register in a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthClientSpec {
    pub pool_id: String,
    pub name: String,
    pub flows: Vec<OAuthFlow>,
    pub scopes: Vec<String>,
    pub callback_urls: Vec<String>,
    pub identity_providers: Vec<String>,
}

impl OAuthClientSpec {
    /// Dashboard client for a pool, authenticating against the pool itself.
    pub fn dashboard(
        pool_id: impl Into<String>,
        callback_url: impl Into<String>,
        settings: &ProvisioningSettings,
    ) -> Self {
        Self {
            pool_id: pool_id.into(),
            name: settings.client_name.clone(),
            flows: vec![settings.oauth_flow],
            scopes: settings.oauth_scopes.clone(),
            callback_urls: vec![callback_url.into()],
            identity_providers: vec![POOL_IDENTITY_PROVIDER.to_string()],
        }
    }
}
