//! Inbound provisioning requests and their validation.

use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::ProvisioningSettings;
use crate::errors::{AppError, AppResult};

/// Which provisioning surface a request came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Account creation: caller supplies the OAuth callback URL.
    Account,
    /// Bare pool creation: the configured default callback URL is used.
    Pool,
}

/// Account-creation payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    /// Desired user pool name
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 128, message = "name must be between 1 and 128 characters"))]
    #[schema(example = "Acme Corp")]
    pub name: String,
    /// OAuth callback URL for the dashboard client
    #[serde(rename = "callbackUrl")]
    #[validate(
        required(message = "callbackUrl is required"),
        url(message = "callbackUrl must be a valid URL")
    )]
    #[schema(example = "https://app.acme.test/cb")]
    pub callback_url: Option<String>,
}

/// Bare pool-creation payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePoolRequest {
    /// Desired user pool name
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 128, message = "name must be between 1 and 128 characters"))]
    #[schema(example = "Acme Corp")]
    pub name: String,
}

/// A validated request, ready for the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningRequest {
    pool_name: String,
    callback_url: String,
}

impl ProvisioningRequest {
    pub fn new(pool_name: impl Into<String>, callback_url: impl Into<String>) -> Self {
        Self {
            pool_name: pool_name.into(),
            callback_url: callback_url.into(),
        }
    }

    /// Decode and validate a raw JSON payload for the given variant.
    ///
    /// Fails with [`AppError::InvalidRequest`] when the body is not the
    /// expected shape, the name is blank, or (account variant only) the
    /// callback URL is missing.
    pub fn from_payload(
        body: &[u8],
        variant: Variant,
        settings: &ProvisioningSettings,
    ) -> AppResult<Self> {
        let (name, callback_url) = match variant {
            Variant::Account => {
                let payload: CreateAccountRequest = decode(body)?;
                payload
                    .validate()
                    .map_err(|e| AppError::invalid_request(format_validation_errors(&e)))?;
                (payload.name, payload.callback_url)
            }
            Variant::Pool => {
                let payload: CreatePoolRequest = decode(body)?;
                payload
                    .validate()
                    .map_err(|e| AppError::invalid_request(format_validation_errors(&e)))?;
                (payload.name, None)
            }
        };

        if name.is_empty() {
            return Err(AppError::invalid_request("name is required"));
        }

        let callback_url = match callback_url {
            Some(url) => url,
            None if variant == Variant::Pool => settings.default_callback_url.clone(),
            None => return Err(AppError::invalid_request("callbackUrl is required")),
        };

        Ok(Self::new(name, callback_url))
    }

    pub fn pool_name(&self) -> &str {
        &self.pool_name
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }
}

/// Names are limited and validated without their surrounding whitespace.
fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|e| AppError::invalid_request(e.to_string()))
}

/// Format validation errors into a user-friendly string
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>();
    messages.sort();
    messages.join(", ")
}
