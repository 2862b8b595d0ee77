//! Outcome of a successful provisioning run.

use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};

/// Identifiers of a fully provisioned tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProvisioningResult {
    /// Identifier of the created user pool
    #[serde(rename = "UserPoolID")]
    #[schema(example = "us-east-1_AbCdEfGhI")]
    pub user_pool_id: String,
    /// Identifier of the dashboard OAuth client
    #[serde(rename = "ClientID")]
    #[schema(example = "1example23456789")]
    pub client_id: String,
}

impl ProvisioningResult {
    /// Build the result from the identifiers captured during provisioning.
    ///
    /// An empty identifier counts as missing.
    pub fn assemble(user_pool_id: Option<String>, client_id: Option<String>) -> AppResult<Self> {
        let user_pool_id = user_pool_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::assembly("user pool id missing after provisioning"))?;
        let client_id = client_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::assembly("client id missing after provisioning"))?;

        Ok(Self {
            user_pool_id,
            client_id,
        })
    }
}
