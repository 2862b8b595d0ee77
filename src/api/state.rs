//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::{Config, ProvisioningSettings};
use crate::infra::IdentityProvider;
use crate::services::{ProvisioningService, Provisioner};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Provisioning workflow
    pub provisioning_service: Arc<dyn ProvisioningService>,
    /// Workflow settings (default callback URL, allowed origin, ...)
    pub settings: Arc<ProvisioningSettings>,
}

impl AppState {
    /// Wire the provisioning service over the given identity provider.
    pub fn from_config(provider: Arc<dyn IdentityProvider>, config: &Config) -> Self {
        let settings = config.provisioning.clone();
        let service = Arc::new(Provisioner::new(provider, settings.clone()));

        Self::new(service, settings)
    }

    /// Create application state with a manually injected service.
    pub fn new(
        provisioning_service: Arc<dyn ProvisioningService>,
        settings: ProvisioningSettings,
    ) -> Self {
        Self {
            provisioning_service,
            settings: Arc::new(settings),
        }
    }
}
