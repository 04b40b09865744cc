//! Application error taxonomy and its HTTP mapping.
//!
//! Every fallible operation of the registry and the click tracker returns
//! [`AppError`]. The API layer renders it as
//! `{"error": {"code", "message", "details"}}` with the matching status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed target URL or short code. Detected before the store is touched.
    #[error("{message}")]
    InvalidInput { message: String, details: Value },

    /// The store rejected the insert because the code is already taken.
    #[error("Code '{code}' already exists")]
    CodeConflict { code: String },

    /// Every generated candidate collided with an existing link.
    #[error("Failed to generate a unique code after {attempts} attempts")]
    CodeGenerationExhausted { attempts: usize },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Transport, availability or deadline failure of the store.
    #[error("Store error: {0}")]
    Store(String),
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn code_conflict(code: impl Into<String>) -> Self {
        Self::CodeConflict { code: code.into() }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::CodeConflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::CodeGenerationExhausted { .. } | AppError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts the error into its serializable form.
    ///
    /// Store failures are reported with a generic message; the underlying
    /// cause is only written to the log.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            AppError::InvalidInput { message, details } => ErrorInfo {
                code: "invalid_input",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::CodeConflict { code } => ErrorInfo {
                code: "code_conflict",
                message: "Code already exists".to_string(),
                details: json!({ "code": code }),
            },
            AppError::CodeGenerationExhausted { attempts } => ErrorInfo {
                code: "code_generation_exhausted",
                message: "Failed to generate unique code".to_string(),
                details: json!({ "attempts": attempts }),
            },
            AppError::NotFound { message, details } => ErrorInfo {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::Store(_) => ErrorInfo {
                code: "store_error",
                message: "Store unavailable".to_string(),
                details: json!({}),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Store(ref cause) = self {
            tracing::error!(cause = %cause, "Request failed with store error");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Store(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::invalid_input("Request validation failed", details)
    }
}
