//! Application settings loaded from environment variables.

use std::env;

use axum::http::HeaderValue;
use validator::ValidateUrl;

use super::constants::{
    DEFAULT_ALLOWED_ORIGIN, DEFAULT_CALLBACK_URL, DEFAULT_CLIENT_NAME, DEFAULT_DOMAIN_NAMESPACE,
    DEFAULT_OAUTH_FLOW, DEFAULT_OAUTH_SCOPES,
};
use crate::domain::{is_valid_namespace, OAuthFlow};

/// What the orchestrator does with already-created resources when a later step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollbackPolicy {
    /// Leave earlier resources in place (they become orphans).
    #[default]
    None,
    /// Delete earlier resources in reverse order, logging delete failures.
    BestEffort,
}

impl std::str::FromStr for RollbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(RollbackPolicy::None),
            "best-effort" | "best_effort" => Ok(RollbackPolicy::BestEffort),
            other => Err(format!("unknown rollback policy: {}", other)),
        }
    }
}

/// Tunables of the provisioning workflow.
#[derive(Debug, Clone)]
pub struct ProvisioningSettings {
    pub client_name: String,
    pub oauth_scopes: Vec<String>,
    pub oauth_flow: OAuthFlow,
    pub default_callback_url: String,
    pub domain_namespace: String,
    pub allowed_origin: String,
    pub rollback: RollbackPolicy,
}

impl Default for ProvisioningSettings {
    fn default() -> Self {
        Self {
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            oauth_scopes: DEFAULT_OAUTH_SCOPES.iter().map(|s| s.to_string()).collect(),
            oauth_flow: OAuthFlow::from_wire(DEFAULT_OAUTH_FLOW)
                .unwrap_or(OAuthFlow::AuthorizationCode),
            default_callback_url: DEFAULT_CALLBACK_URL.to_string(),
            domain_namespace: DEFAULT_DOMAIN_NAMESPACE.to_string(),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            rollback: RollbackPolicy::None,
        }
    }
}

impl ProvisioningSettings {
    /// Load overrides from environment variables, keeping defaults for anything unset or invalid.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let oauth_scopes = var("PROVISIONING_OAUTH_SCOPES")
            .map(|v| parse_scopes(&v))
            .filter(|scopes| !scopes.is_empty())
            .unwrap_or(defaults.oauth_scopes);

        let oauth_flow = var("PROVISIONING_OAUTH_FLOW")
            .and_then(|v| match v.parse::<OAuthFlow>() {
                Ok(flow) => Some(flow),
                Err(e) => {
                    tracing::warn!(value = %v, error = %e, "Ignoring PROVISIONING_OAUTH_FLOW");
                    None
                }
            })
            .unwrap_or(defaults.oauth_flow);

        let domain_namespace = match var("PROVISIONING_DOMAIN_NAMESPACE") {
            Some(ns) if is_valid_namespace(&ns) => ns,
            Some(ns) => {
                tracing::warn!(
                    value = %ns,
                    "PROVISIONING_DOMAIN_NAMESPACE must be lowercase alphanumerics and hyphens, using default"
                );
                defaults.domain_namespace
            }
            None => defaults.domain_namespace,
        };

        let default_callback_url = match var("PROVISIONING_DEFAULT_CALLBACK_URL") {
            Some(url) if url.validate_url() => url,
            Some(url) => {
                tracing::warn!(
                    value = %url,
                    "PROVISIONING_DEFAULT_CALLBACK_URL is not a valid URL, using default"
                );
                defaults.default_callback_url
            }
            None => defaults.default_callback_url,
        };

        // Sent verbatim as Access-Control-Allow-Origin on every account response
        let allowed_origin = match var("CORS_ALLOWED_ORIGIN") {
            Some(origin) if !origin.is_empty() && HeaderValue::from_str(&origin).is_ok() => origin,
            Some(origin) => {
                tracing::warn!(
                    value = %origin,
                    "CORS_ALLOWED_ORIGIN is not a usable header value, using default"
                );
                defaults.allowed_origin
            }
            None => defaults.allowed_origin,
        };

        let rollback = var("PROVISIONING_ROLLBACK")
            .and_then(|v| match v.parse::<RollbackPolicy>() {
                Ok(policy) => Some(policy),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring PROVISIONING_ROLLBACK");
                    None
                }
            })
            .unwrap_or(defaults.rollback);

        Self {
            client_name: var("PROVISIONING_CLIENT_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.client_name),
            oauth_scopes,
            oauth_flow,
            default_callback_url,
            domain_namespace,
            allowed_origin,
            rollback,
        }
    }
}

fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Region override; the AWS default chain applies when unset
    pub aws_region: Option<String>,
    pub provisioning: ProvisioningSettings,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            aws_region: env::var("AWS_REGION_OVERRIDE")
                .ok()
                .filter(|v| !v.is_empty()),
            provisioning: ProvisioningSettings::from_env(),
        }
    }
}
