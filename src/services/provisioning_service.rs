//! Provisioning service - Creates a tenant's pool, hosted domain and dashboard client.
//!
//! Steps run strictly in order (pool → domain → client), each consuming the
//! pool id produced by the first. The first failure aborts the run.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{ProvisioningSettings, RollbackPolicy};
use crate::domain::{
    DomainPrefix, OAuthClientSpec, PoolDomainSpec, ProvisioningRequest, ProvisioningResult,
    ProvisioningStep, UserPoolSpec,
};
use crate::errors::{AppError, AppResult};
use crate::infra::IdentityProvider;

/// Provisioning service trait for dependency injection.
#[async_trait]
pub trait ProvisioningService: Send + Sync {
    /// Provision the identity resources for one tenant
    async fn provision(&self, request: ProvisioningRequest) -> AppResult<ProvisioningResult>;
}

/// A resource created during the current run, kept for compensation.
#[derive(Debug)]
enum CreatedResource {
    Pool(String),
    Domain(PoolDomainSpec),
    Client { pool_id: String, client_id: String },
}

/// Concrete implementation of ProvisioningService over an injected identity provider.
pub struct Provisioner {
    provider: Arc<dyn IdentityProvider>,
    settings: ProvisioningSettings,
}

impl Provisioner {
    pub fn new(provider: Arc<dyn IdentityProvider>, settings: ProvisioningSettings) -> Self {
        Self { provider, settings }
    }

    async fn run(
        &self,
        request: &ProvisioningRequest,
        created: &mut Vec<CreatedResource>,
    ) -> AppResult<ProvisioningResult> {
        let pool_spec = UserPoolSpec::self_service(request.pool_name());
        let pool_id = self
            .provider
            .create_user_pool(&pool_spec)
            .await
            .map_err(|e| AppError::provisioning(ProvisioningStep::CreatePool, e))?;
        tracing::info!(pool_id = %pool_id, pool_name = %pool_spec.name, "User pool created");
        created.push(CreatedResource::Pool(pool_id.clone()));

        let domain_spec = PoolDomainSpec {
            prefix: DomainPrefix::derive(request.pool_name(), &self.settings.domain_namespace),
            pool_id: pool_id.clone(),
        };
        self.provider
            .create_domain(&domain_spec)
            .await
            .map_err(|e| AppError::provisioning(ProvisioningStep::CreateDomain, e))?;
        tracing::info!(pool_id = %pool_id, domain = %domain_spec.prefix, "Pool domain created");
        created.push(CreatedResource::Domain(domain_spec));

        let client_spec =
            OAuthClientSpec::dashboard(pool_id.as_str(), request.callback_url(), &self.settings);
        let client_id = self
            .provider
            .create_oauth_client(&client_spec)
            .await
            .map_err(|e| AppError::provisioning(ProvisioningStep::CreateClient, e))?;
        tracing::info!(pool_id = %pool_id, client_id = %client_id, "OAuth client created");
        created.push(CreatedResource::Client {
            pool_id: pool_id.clone(),
            client_id: client_id.clone(),
        });

        ProvisioningResult::assemble(Some(pool_id), Some(client_id))
    }

    /// Best-effort removal of resources in reverse creation order.
    ///
    /// Failures are logged and never replace the error that triggered the rollback.
    async fn compensate(&self, created: Vec<CreatedResource>) {
        for resource in created.into_iter().rev() {
            let outcome = match &resource {
                CreatedResource::Client { pool_id, client_id } => {
                    self.provider.delete_oauth_client(pool_id, client_id).await
                }
                CreatedResource::Domain(spec) => self.provider.delete_domain(spec).await,
                CreatedResource::Pool(pool_id) => self.provider.delete_user_pool(pool_id).await,
            };

            match outcome {
                Ok(()) => tracing::info!(resource = ?resource, "Rolled back resource"),
                Err(e) => {
                    tracing::warn!(resource = ?resource, error = %e, "Failed to roll back resource")
                }
            }
        }
    }
}

#[async_trait]
impl ProvisioningService for Provisioner {
    async fn provision(&self, request: ProvisioningRequest) -> AppResult<ProvisioningResult> {
        let mut created = Vec::new();

        match self.run(&request, &mut created).await {
            Ok(result) => Ok(result),
            Err(err) => {
                if created.is_empty() {
                    return Err(err);
                }
                match self.settings.rollback {
                    RollbackPolicy::BestEffort => {
                        tracing::warn!(error = %err, count = created.len(), "Provisioning failed, rolling back");
                        self.compensate(created).await;
                    }
                    RollbackPolicy::None => {
                        tracing::warn!(
                            error = %err,
                            orphaned = ?created,
                            "Provisioning failed, leaving created resources in place"
                        );
                    }
                }
                Err(err)
            }
        }
    }
}
