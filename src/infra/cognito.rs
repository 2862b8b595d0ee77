//! AWS Cognito implementation of [`IdentityProvider`].

use std::fmt;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cognitoidentityprovider::{
    config::Region,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    types::{AdminCreateUserConfigType, OAuthFlowType, UsernameAttributeType, VerifiedAttributeType},
    Client,
};

use super::identity_provider::{IdentityProvider, ProviderError, ProviderErrorKind, ProviderResult};
use crate::domain::{OAuthClientSpec, PoolDomainSpec, UserPoolSpec};

/// Identity provider backed by Cognito user pools.
#[derive(Clone)]
pub struct CognitoIdentityProvider {
    client: Client,
}

impl CognitoIdentityProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS credential and region chain.
    pub async fn from_env(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let sdk_config = loader.load().await;

        tracing::debug!(region = ?sdk_config.region(), "Cognito client configured");
        Self::new(Client::new(&sdk_config))
    }
}

impl fmt::Debug for CognitoIdentityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CognitoIdentityProvider").finish_non_exhaustive()
    }
}

#[async_trait]
impl IdentityProvider for CognitoIdentityProvider {
    async fn create_user_pool(&self, spec: &UserPoolSpec) -> ProviderResult<String> {
        let admin_config = AdminCreateUserConfigType::builder()
            .allow_admin_create_user_only(!spec.self_signup_enabled)
            .build();

        let output = self
            .client
            .create_user_pool()
            .pool_name(&spec.name)
            .admin_create_user_config(admin_config)
            .set_username_attributes(Some(
                spec.username_attributes
                    .iter()
                    .map(|a| UsernameAttributeType::from(a.as_str()))
                    .collect(),
            ))
            .set_auto_verified_attributes(Some(
                spec.auto_verified_attributes
                    .iter()
                    .map(|a| VerifiedAttributeType::from(a.as_str()))
                    .collect(),
            ))
            .send()
            .await
            .map_err(classify)?;

        output
            .user_pool()
            .and_then(|pool| pool.id())
            .map(str::to_string)
            .ok_or_else(|| missing_field("CreateUserPool", "UserPool.Id"))
    }

    async fn create_domain(&self, spec: &PoolDomainSpec) -> ProviderResult<()> {
        self.client
            .create_user_pool_domain()
            .domain(spec.prefix.as_str())
            .user_pool_id(&spec.pool_id)
            .send()
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn create_oauth_client(&self, spec: &OAuthClientSpec) -> ProviderResult<String> {
        let output = self
            .client
            .create_user_pool_client()
            .user_pool_id(&spec.pool_id)
            .client_name(&spec.name)
            .set_allowed_o_auth_flows(Some(
                spec.flows
                    .iter()
                    .map(|flow| OAuthFlowType::from(flow.as_str()))
                    .collect(),
            ))
            .allowed_o_auth_flows_user_pool_client(true)
            .set_allowed_o_auth_scopes(Some(spec.scopes.clone()))
            .set_callback_urls(Some(spec.callback_urls.clone()))
            .set_supported_identity_providers(Some(spec.identity_providers.clone()))
            .send()
            .await
            .map_err(classify)?;

        output
            .user_pool_client()
            .and_then(|client| client.client_id())
            .map(str::to_string)
            .ok_or_else(|| missing_field("CreateUserPoolClient", "UserPoolClient.ClientId"))
    }

    async fn delete_user_pool(&self, pool_id: &str) -> ProviderResult<()> {
        self.client
            .delete_user_pool()
            .user_pool_id(pool_id)
            .send()
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn delete_domain(&self, spec: &PoolDomainSpec) -> ProviderResult<()> {
        self.client
            .delete_user_pool_domain()
            .domain(spec.prefix.as_str())
            .user_pool_id(&spec.pool_id)
            .send()
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn delete_oauth_client(&self, pool_id: &str, client_id: &str) -> ProviderResult<()> {
        self.client
            .delete_user_pool_client()
            .user_pool_id(pool_id)
            .client_id(client_id)
            .send()
            .await
            .map_err(classify)?;
        Ok(())
    }
}

fn missing_field(operation: &str, field: &str) -> ProviderError {
    ProviderError::new(
        ProviderErrorKind::Other,
        format!("{} response did not include {}", operation, field),
    )
}

/// Convert an SDK error into a classified [`ProviderError`].
fn classify<E, R>(err: SdkError<E, R>) -> ProviderError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: fmt::Debug,
{
    let code = err.code().map(str::to_string);
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
    let kind = classify_code(code.as_deref(), &message);

    let error = ProviderError::new(kind, message);
    match code {
        Some(code) => error.with_code(code),
        None => error,
    }
}

/// Map a Cognito error code (and message, for overloaded codes) to a kind.
fn classify_code(code: Option<&str>, message: &str) -> ProviderErrorKind {
    match code {
        Some("AliasExistsException" | "DuplicateProviderException" | "UsernameExistsException") => {
            ProviderErrorKind::Conflict
        }
        // Cognito reports a taken domain prefix as an invalid parameter
        Some("InvalidParameterException")
            if message.contains("already associated") || message.contains("already exists") =>
        {
            ProviderErrorKind::Conflict
        }
        Some("InvalidParameterException") => ProviderErrorKind::InvalidParameter,
        Some("TooManyRequestsException" | "LimitExceededException") => ProviderErrorKind::Throttled,
        Some("ResourceNotFoundException") => ProviderErrorKind::NotFound,
        _ => ProviderErrorKind::Other,
    }
}
