//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Malformed or incomplete input; `fields` maps field name to problem.
    #[error("{message}")]
    InvalidInput {
        message: String,
        fields: BTreeMap<String, String>,
    },

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// Path exists but does not accept the request method.
    #[error("{0}")]
    MethodNotAllowed(String),

    /// Acting identity may not perform the operation.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ErrorResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorDetail>,
}

/// Diagnostic block, only rendered outside production.
#[derive(Debug, Clone, Serialize)]
struct ErrorDetail {
    code: &'static str,
    status: u16,
    detail: String,
}

/// Snapshot of a rendered error, attached to the response extensions so the
/// envelope middleware can re-render it for production.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub fields: Option<BTreeMap<String, String>>,
    pub detail: String,
}

impl ErrorReport {
    pub(crate) fn full_body(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            message: self.message.clone(),
            errors: self.fields.clone(),
            error: Some(ErrorDetail {
                code: self.code,
                status: self.status.as_u16(),
                detail: self.detail.clone(),
            }),
        }
    }

    /// Body safe for production: no diagnostics, generic text for 5xx.
    pub(crate) fn redacted_body(&self) -> ErrorResponse {
        let message = if self.status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.message.clone()
        };

        ErrorResponse {
            success: false,
            message,
            errors: self.fields.clone(),
            error: None,
        }
    }
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput { .. } => "INVALID_INPUT",
            AppError::Conflict(_) => "CONFLICT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Unauthorized => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the report rendered for this error.
    pub fn report(&self) -> ErrorReport {
        let (fields, detail) = match self {
            AppError::InvalidInput { fields, .. } if !fields.is_empty() => {
                (Some(fields.clone()), self.to_string())
            }
            AppError::Internal(msg) => (None, msg.clone()),
            _ => (None, self.to_string()),
        };

        ErrorReport {
            status: self.status(),
            code: self.code(),
            message: self.to_string(),
            fields,
            detail,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let report = self.report();

        if report.status.is_server_error() {
            tracing::error!(code = report.code, detail = %report.detail, "Request failed");
        } else {
            tracing::debug!(code = report.code, message = %report.message, "Request rejected");
        }

        let mut response = (report.status, Json(report.full_body())).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AppError::InvalidInput {
            message: msg.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn invalid_fields(msg: impl Into<String>, fields: BTreeMap<String, String>) -> Self {
        AppError::InvalidInput {
            message: msg.into(),
            fields,
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn user_not_found(id: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("User with ID {} not found", id))
    }

    pub fn method_not_allowed(
        method: impl std::fmt::Display,
        path: impl std::fmt::Display,
    ) -> Self {
        AppError::MethodNotAllowed(format!("Method {} not allowed on {}", method, path))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::invalid_input("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(AppError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthorized.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::method_not_allowed("PATCH", "/api/users").status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(AppError::internal("x").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_message_hides_detail() {
        let err = AppError::internal("lock poisoned");
        assert_eq!(err.to_string(), "Internal server error");

        let report = err.report();
        assert_eq!(report.detail, "lock poisoned");

        let redacted = report.redacted_body();
        assert_eq!(redacted.message, "Internal server error");
        assert!(redacted.error.is_none());
    }

    #[test]
    fn test_redacted_client_error_keeps_message() {
        let report = AppError::user_not_found("abc").report();
        let body = report.redacted_body();
        assert_eq!(body.message, "User with ID abc not found");
        assert!(body.error.is_none());
    }

    #[test]
    fn test_into_response_attaches_report() {
        let response = AppError::conflict("taken").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.code, "CONFLICT");
        assert_eq!(report.message, "taken");
    }
}
