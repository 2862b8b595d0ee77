//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::provisioning_handler;
use crate::domain::{CreateAccountRequest, CreatePoolRequest, ProvisioningResult};

/// OpenAPI documentation for the tenant provisioner
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tenant Provisioner",
        version = "0.1.0",
        description = "Creates a user pool, hosted domain and dashboard OAuth client per tenant",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        provisioning_handler::create_account,
        provisioning_handler::create_pool,
    ),
    components(
        schemas(
            CreateAccountRequest,
            CreatePoolRequest,
            ProvisioningResult,
        )
    ),
    tags(
        (name = "Provisioning", description = "Tenant identity provisioning")
    )
)]
pub struct ApiDoc;
