//! Integration tests for API endpoints.
//!
//! These tests drive the real router and provisioning workflow against a
//! recording identity provider, so no AWS account is needed.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::ACCESS_CONTROL_ALLOW_ORIGIN, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use tenant_provisioner::api::{create_router, AppState};
use tenant_provisioner::config::{Config, ProvisioningSettings, RollbackPolicy};
use tenant_provisioner::domain::{
    OAuthClientSpec, PoolDomainSpec, ProvisioningStep, UserPoolSpec,
};
use tenant_provisioner::infra::{
    IdentityProvider, ProviderError, ProviderErrorKind, ProviderResult,
};

// =============================================================================
// Recording Provider for Testing
// =============================================================================

/// A provider call, as seen by the fake
#[derive(Debug, Clone, PartialEq)]
enum Call {
    CreatePool(UserPoolSpec),
    CreateDomain(PoolDomainSpec),
    CreateClient(OAuthClientSpec),
    DeletePool(String),
    DeleteDomain(String),
    DeleteClient(String),
}

/// Fake provider that records every call and can fail at one step
#[derive(Default)]
struct RecordingProvider {
    calls: Mutex<Vec<Call>>,
    fail_at: Option<(ProvisioningStep, ProviderErrorKind)>,
}

impl RecordingProvider {
    fn failing_at(step: ProvisioningStep, kind: ProviderErrorKind) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_at: Some((step, kind)),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn outcome(&self, step: ProvisioningStep) -> ProviderResult<()> {
        match self.fail_at {
            Some((failing, kind)) if failing == step => {
                Err(ProviderError::new(kind, format!("{} refused", step)).with_code("TestException"))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl IdentityProvider for RecordingProvider {
    async fn create_user_pool(&self, spec: &UserPoolSpec) -> ProviderResult<String> {
        self.record(Call::CreatePool(spec.clone()));
        self.outcome(ProvisioningStep::CreatePool)?;
        Ok("pool-1".to_string())
    }

    async fn create_domain(&self, spec: &PoolDomainSpec) -> ProviderResult<()> {
        self.record(Call::CreateDomain(spec.clone()));
        self.outcome(ProvisioningStep::CreateDomain)
    }

    async fn create_oauth_client(&self, spec: &OAuthClientSpec) -> ProviderResult<String> {
        self.record(Call::CreateClient(spec.clone()));
        self.outcome(ProvisioningStep::CreateClient)?;
        Ok("client-1".to_string())
    }

    async fn delete_user_pool(&self, pool_id: &str) -> ProviderResult<()> {
        self.record(Call::DeletePool(pool_id.to_string()));
        Ok(())
    }

    async fn delete_domain(&self, spec: &PoolDomainSpec) -> ProviderResult<()> {
        self.record(Call::DeleteDomain(spec.prefix.to_string()));
        Ok(())
    }

    async fn delete_oauth_client(&self, _pool_id: &str, client_id: &str) -> ProviderResult<()> {
        self.record(Call::DeleteClient(client_id.to_string()));
        Ok(())
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn test_config(rollback: RollbackPolicy) -> Config {
    Config {
        aws_region: None,
        provisioning: ProvisioningSettings {
            rollback,
            ..ProvisioningSettings::default()
        },
    }
}

fn app(provider: Arc<RecordingProvider>, rollback: RollbackPolicy) -> Router {
    create_router(AppState::from_config(provider, &test_config(rollback)))
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

fn domain_calls(calls: &[Call]) -> Vec<&PoolDomainSpec> {
    calls
        .iter()
        .filter_map(|c| match c {
            Call::CreateDomain(spec) => Some(spec),
            _ => None,
        })
        .collect()
}

fn is_delete(call: &Call) -> bool {
    matches!(
        call,
        Call::DeletePool(_) | Call::DeleteDomain(_) | Call::DeleteClient(_)
    )
}

// =============================================================================
// Account Creation Tests
// =============================================================================

#[tokio::test]
async fn test_create_account_end_to_end() {
    let provider = Arc::new(RecordingProvider::default());
    let response = app(provider.clone(), RollbackPolicy::None)
        .oneshot(post(
            "/accounts",
            r#"{"name":"Acme Corp","callbackUrl":"https://app.acme.test/cb"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3002"
    );

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "UserPoolID": "pool-1", "ClientID": "client-1" })
    );

    let calls = provider.calls();
    let domains = domain_calls(&calls);
    assert_eq!(domains.len(), 1);
    assert_eq!(domains[0].prefix.as_str(), "tina-auth-acme-corp");
    assert_eq!(domains[0].pool_id, "pool-1");

    // Canonical order: pool, domain, client
    assert!(matches!(calls[0], Call::CreatePool(ref spec) if spec.name == "Acme Corp"));
    assert!(matches!(calls[1], Call::CreateDomain(_)));
    assert!(
        matches!(calls[2], Call::CreateClient(ref spec) if spec.callback_urls == ["https://app.acme.test/cb"])
    );
    assert_eq!(calls.len(), 3);
}

#[tokio::test]
async fn test_malformed_body_makes_no_provider_calls() {
    let provider = Arc::new(RecordingProvider::default());
    let response = app(provider.clone(), RollbackPolicy::None)
        .oneshot(post("/accounts", "{this is not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_missing_name_makes_no_provider_calls() {
    let provider = Arc::new(RecordingProvider::default());
    let response = app(provider.clone(), RollbackPolicy::None)
        .oneshot(post(
            "/accounts",
            r#"{"callbackUrl":"https://app.acme.test/cb"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_missing_callback_url_makes_no_provider_calls() {
    let provider = Arc::new(RecordingProvider::default());
    let response = app(provider.clone(), RollbackPolicy::None)
        .oneshot(post("/accounts", r#"{"name":"Acme Corp"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_pool_failure_returns_server_error() {
    let provider = Arc::new(RecordingProvider::failing_at(
        ProvisioningStep::CreatePool,
        ProviderErrorKind::Throttled,
    ));
    let response = app(provider.clone(), RollbackPolicy::None)
        .oneshot(post(
            "/accounts",
            r#"{"name":"Acme Corp","callbackUrl":"https://app.acme.test/cb"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(provider.calls().len(), 1);
}

#[tokio::test]
async fn test_client_failure_issues_no_deletes() {
    let provider = Arc::new(RecordingProvider::failing_at(
        ProvisioningStep::CreateClient,
        ProviderErrorKind::Other,
    ));
    let response = app(provider.clone(), RollbackPolicy::None)
        .oneshot(post(
            "/accounts",
            r#"{"name":"Acme Corp","callbackUrl":"https://app.acme.test/cb"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"]["code"], "PROVISIONING_FAILED");
    // Provider details stay in the logs
    assert!(!body.to_string().contains("refused"));

    let calls = provider.calls();
    assert_eq!(calls.len(), 3);
    assert!(!calls.iter().any(is_delete));
}

#[tokio::test]
async fn test_client_failure_with_rollback_deletes_in_reverse() {
    let provider = Arc::new(RecordingProvider::failing_at(
        ProvisioningStep::CreateClient,
        ProviderErrorKind::Other,
    ));
    let response = app(provider.clone(), RollbackPolicy::BestEffort)
        .oneshot(post(
            "/accounts",
            r#"{"name":"Acme Corp","callbackUrl":"https://app.acme.test/cb"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let deletes: Vec<Call> = provider.calls().into_iter().filter(is_delete).collect();
    assert_eq!(
        deletes,
        vec![
            Call::DeleteDomain("tina-auth-acme-corp".to_string()),
            Call::DeletePool("pool-1".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_domain_collision_has_distinct_code() {
    let provider = Arc::new(RecordingProvider::failing_at(
        ProvisioningStep::CreateDomain,
        ProviderErrorKind::Conflict,
    ));
    let response = app(provider.clone(), RollbackPolicy::None)
        .oneshot(post(
            "/accounts",
            r#"{"name":"Acme Corp","callbackUrl":"https://app.acme.test/cb"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"]["code"], "DOMAIN_PREFIX_TAKEN");
    assert!(!provider
        .calls()
        .iter()
        .any(|c| matches!(c, Call::CreateClient(_))));
}

// =============================================================================
// Bare Pool Creation Tests
// =============================================================================

#[tokio::test]
async fn test_create_pool_uses_default_callback() {
    let provider = Arc::new(RecordingProvider::default());
    let response = app(provider.clone(), RollbackPolicy::None)
        .oneshot(post("/pools", r#"{"name":"Acme Corp"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(body_bytes(response).await.is_empty());

    let calls = provider.calls();
    let client = calls
        .iter()
        .find_map(|c| match c {
            Call::CreateClient(spec) => Some(spec),
            _ => None,
        })
        .unwrap();
    assert_eq!(client.callback_urls, vec!["http://localhost:3000"]);
    assert_eq!(client.name, "Dashboard");
}

#[tokio::test]
async fn test_create_pool_downstream_failure_returns_server_error() {
    let provider = Arc::new(RecordingProvider::failing_at(
        ProvisioningStep::CreateDomain,
        ProviderErrorKind::Throttled,
    ));
    let response = app(provider.clone(), RollbackPolicy::None)
        .oneshot(post("/pools", r#"{"name":"Acme Corp"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"]["code"], "PROVISIONING_FAILED");

    let calls = provider.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[1], Call::CreateDomain(_)));
}

#[tokio::test]
async fn test_create_pool_malformed_body() {
    let provider = Arc::new(RecordingProvider::default());
    let response = app(provider.clone(), RollbackPolicy::None)
        .oneshot(post("/pools", "not json at all"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(provider.calls().is_empty());
}

// =============================================================================
// Health Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let provider = Arc::new(RecordingProvider::default());
    let response = app(provider.clone(), RollbackPolicy::None)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(provider.calls().is_empty());
}
