//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::ProvisioningStep;
use crate::infra::{ProviderError, ProviderErrorKind};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or incomplete input payload. Never retried.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// An identity-provider call failed at a named step.
    #[error("Provisioning failed at step '{step}'")]
    Provisioning {
        step: ProvisioningStep,
        #[source]
        source: ProviderError,
    },

    /// Missing identifier after every step reported success.
    #[error("Result assembly failed: {0}")]
    Assembly(String),

    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            _ if self.is_prefix_collision() => "DOMAIN_PREFIX_TAKEN",
            AppError::Provisioning { .. } => "PROVISIONING_FAILED",
            AppError::Assembly(_) | AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Provisioning { .. } | AppError::Assembly(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Step that failed, for provisioning errors
    pub fn step(&self) -> Option<ProvisioningStep> {
        match self {
            AppError::Provisioning { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Whether the derived domain prefix is already taken by another pool.
    pub fn is_prefix_collision(&self) -> bool {
        matches!(
            self,
            AppError::Provisioning {
                step: ProvisioningStep::CreateDomain,
                source,
            } if source.kind == ProviderErrorKind::Conflict
        )
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::InvalidRequest(msg) => msg.clone(),

            AppError::Provisioning { step, source } => {
                tracing::error!(
                    step = %step,
                    kind = %source.kind,
                    code = source.code.as_deref().unwrap_or("unknown"),
                    error = %source,
                    "Provisioning error"
                );
                if self.is_prefix_collision() {
                    "The domain derived from this name is already taken, choose another name"
                        .to_string()
                } else {
                    format!("Failed to {}", step)
                }
            }
            AppError::Assembly(msg) => {
                tracing::error!("Assembly error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        AppError::InvalidRequest(msg.into())
    }

    pub fn provisioning(step: ProvisioningStep, source: ProviderError) -> Self {
        AppError::Provisioning { step, source }
    }

    pub fn assembly(msg: impl Into<String>) -> Self {
        AppError::Assembly(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
