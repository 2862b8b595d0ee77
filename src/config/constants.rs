//! Application-wide constants
//!
//! Centralized location for the fixed values of the provisioning workflow.
//! Each has an override point in [`super::ProvisioningSettings`].

// =============================================================================
// OAuth Client
// =============================================================================

/// Name of the OAuth client created in every new pool
pub const DEFAULT_CLIENT_NAME: &str = "Dashboard";

/// Scopes granted to the dashboard client
pub const DEFAULT_OAUTH_SCOPES: &[&str] = &["email", "profile", "openid"];

/// OAuth flow allowed for the dashboard client (authorization code)
pub const DEFAULT_OAUTH_FLOW: &str = "code";

/// Identity provider backing the client: the pool's own user directory
pub const POOL_IDENTITY_PROVIDER: &str = "COGNITO";

/// Callback URL used when the request does not carry one
pub const DEFAULT_CALLBACK_URL: &str = "http://localhost:3000";

// =============================================================================
// User Pool
// =============================================================================

/// Attribute users sign in with and verify at signup
pub const EMAIL_ATTRIBUTE: &str = "email";

// =============================================================================
// Hosted Domain
// =============================================================================

/// Namespace tag prepended to every derived domain prefix
pub const DEFAULT_DOMAIN_NAMESPACE: &str = "tina-auth-";

/// Provider limit on domain prefix length
pub const MAX_DOMAIN_PREFIX_LENGTH: usize = 63;

/// Hex digits of the name digest used when a name slugifies to nothing
pub const DEGENERATE_SLUG_DIGEST_LENGTH: usize = 12;

// =============================================================================
// HTTP
// =============================================================================

/// Origin allowed to read account-creation responses
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3002";

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;
