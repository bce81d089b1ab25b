//! Error handling for the Stockroom backend
//!
//! Every failure is rendered as `{"error": {code, message, field?, details}}`

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use shared::validation::{DepartmentIssue, ValidationReport};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Batch rejected")]
    BatchRejected(ValidationReport),

    #[error("Department conflict: {0}")]
    DepartmentConflict(DepartmentIssue),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Upstream inventory API errors
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream rejected: {message}")]
    UpstreamRejected { message: String, errors: Vec<Value> },

    /// Additions landed upstream but the removals did not
    #[error("Batch partially applied: {cause}")]
    PartiallyApplied {
        units_added: u64,
        products_added: usize,
        cause: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl ErrorDetail {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
            details: Vec::new(),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::BatchRejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DepartmentConflict(DepartmentIssue::MissingName) => StatusCode::BAD_REQUEST,
            AppError::DepartmentConflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::UpstreamRejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PartiallyApplied { .. } => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) | AppError::Internal(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn detail(&self) -> ErrorDetail {
        match self {
            AppError::Validation { field, message } => ErrorDetail {
                field: Some(field.clone()),
                ..ErrorDetail::new("VALIDATION_ERROR", message.clone())
            },
            AppError::BatchRejected(report) => ErrorDetail {
                details: report.messages(),
                ..ErrorDetail::new("BATCH_REJECTED", "The movement batch has problems to fix")
            },
            AppError::DepartmentConflict(issue) => {
                let (code, field) = match issue {
                    DepartmentIssue::MissingName => ("VALIDATION_ERROR", "name"),
                    DepartmentIssue::IconInUse(_) => ("CONFLICT", "icon"),
                    DepartmentIssue::ColorInUse(_) => ("CONFLICT", "color"),
                };
                ErrorDetail {
                    field: Some(field.to_string()),
                    ..ErrorDetail::new(code, issue.to_string())
                }
            }
            AppError::NotFound(resource) => {
                ErrorDetail::new("NOT_FOUND", format!("{} not found", resource))
            }
            AppError::UpstreamUnavailable(_) => ErrorDetail::new(
                "UPSTREAM_UNAVAILABLE",
                "The inventory service could not be reached. Please try again.",
            ),
            AppError::UpstreamRejected { message, errors } => ErrorDetail {
                details: errors
                    .iter()
                    .map(|e| match e {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
                ..ErrorDetail::new("UPSTREAM_REJECTED", message.clone())
            },
            AppError::PartiallyApplied {
                units_added,
                products_added,
                ..
            } => ErrorDetail {
                details: vec![format!(
                    "Added {} units across {} products; no stock was removed",
                    units_added, products_added
                )],
                ..ErrorDetail::new(
                    "PARTIALLY_APPLIED",
                    "The additions were saved but the removals failed. Refresh stock before \
                     resubmitting only the removals.",
                )
            },
            AppError::Configuration(msg) => {
                ErrorDetail::new("CONFIGURATION_ERROR", format!("Configuration error: {}", msg))
            }
            AppError::Internal(msg) => ErrorDetail::new("INTERNAL_ERROR", msg.clone()),
            AppError::InternalError(_) => {
                ErrorDetail::new("INTERNAL_ERROR", "An internal server error occurred")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_detail = self.detail();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let (field, message) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                (field.to_string(), message)
            })
            .unwrap_or_else(|| ("request".to_string(), "Invalid request".to_string()));

        AppError::Validation { field, message }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation {
            field: "query".to_string(),
            message: rejection.body_text(),
        }
    }
}

impl From<DepartmentIssue> for AppError {
    fn from(issue: DepartmentIssue) -> Self {
        AppError::DepartmentConflict(issue)
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
