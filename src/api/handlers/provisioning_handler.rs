//! Provisioning handlers.
//!
//! Bodies are taken as raw bytes so that decoding failures go through the
//! request validator and come back as `InvalidRequest` (400).

use axum::{
    body::Bytes,
    extract::State,
    http::{header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderName, HeaderValue, StatusCode},
    response::Json,
    routing::post,
    Router,
};

use crate::api::AppState;
use crate::domain::{
    CreateAccountRequest, CreatePoolRequest, ProvisioningRequest, ProvisioningResult, Variant,
};
use crate::errors::{AppError, AppResult};

/// Create provisioning routes
pub fn provisioning_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(create_account))
        .route("/pools", post(create_pool))
}

/// Provision identity resources for a new account
#[utoipa::path(
    post,
    path = "/accounts",
    tag = "Provisioning",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Pool, domain and dashboard client created", body = ProvisioningResult),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Identity provider failure")
    )
)]
pub async fn create_account(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(
    StatusCode,
    [(HeaderName, HeaderValue); 1],
    Json<ProvisioningResult>,
)> {
    let request = ProvisioningRequest::from_payload(&body, Variant::Account, &state.settings)?;
    tracing::info!(pool_name = %request.pool_name(), "Provisioning account");

    let origin = HeaderValue::from_str(&state.settings.allowed_origin)
        .map_err(|e| AppError::internal(format!("invalid allowed origin: {}", e)))?;

    let result = state.provisioning_service.provision(request).await?;

    Ok((
        StatusCode::CREATED,
        [(ACCESS_CONTROL_ALLOW_ORIGIN, origin)],
        Json(result),
    ))
}

/// Provision a bare user pool with the default callback URL
#[utoipa::path(
    post,
    path = "/pools",
    tag = "Provisioning",
    request_body = CreatePoolRequest,
    responses(
        (status = 201, description = "Pool, domain and dashboard client created"),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Identity provider failure")
    )
)]
pub async fn create_pool(State(state): State<AppState>, body: Bytes) -> AppResult<StatusCode> {
    let request = ProvisioningRequest::from_payload(&body, Variant::Pool, &state.settings)?;
    tracing::info!(pool_name = %request.pool_name(), "Provisioning pool");

    let result = state.provisioning_service.provision(request).await?;
    tracing::debug!(pool_id = %result.user_pool_id, client_id = %result.client_id, "Pool provisioned");

    Ok(StatusCode::CREATED)
}
