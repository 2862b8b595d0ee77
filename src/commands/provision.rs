//! Provision command - Provisions one tenant and prints its identifiers.

use std::sync::Arc;

use crate::cli::ProvisionArgs;
use crate::config::Config;
use crate::domain::{ProvisioningRequest, Variant};
use crate::errors::{AppError, AppResult};
use crate::infra::CognitoIdentityProvider;
use crate::services::{ProvisioningService, Provisioner};

/// Execute the provision command
pub async fn execute(args: ProvisionArgs, config: Config) -> AppResult<()> {
    let (variant, payload) = payload_for(&args);
    let body = serde_json::to_vec(&payload)
        .map_err(|e| AppError::internal(format!("Failed to encode request: {}", e)))?;
    let request = ProvisioningRequest::from_payload(&body, variant, &config.provisioning)?;

    let provider = Arc::new(CognitoIdentityProvider::from_env(config.aws_region.clone()).await);
    let service = Provisioner::new(provider, config.provisioning);

    let result = service.provision(request).await?;

    let output = serde_json::to_string_pretty(&result)
        .map_err(|e| AppError::internal(format!("Failed to encode result: {}", e)))?;
    println!("{}", output);

    Ok(())
}

/// Same payload the HTTP surface would receive, so both go through one validator.
fn payload_for(args: &ProvisionArgs) -> (Variant, serde_json::Value) {
    match &args.callback_url {
        Some(callback_url) => (
            Variant::Account,
            serde_json::json!({ "name": args.name, "callbackUrl": callback_url }),
        ),
        None => (Variant::Pool, serde_json::json!({ "name": args.name })),
    }
}
