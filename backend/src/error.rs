use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Structured validation errors with field-level error mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationErrors {
    Single { field: String, message: String },
    Multiple { fields: HashMap<String, String> },
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrors::Single { field, message } => write!(f, "{}: {}", field, message),
            ValidationErrors::Multiple { fields } => {
                let mut entries: Vec<_> = fields.iter().collect();
                entries.sort();
                let joined = entries
                    .iter()
                    .map(|(field, message)| format!("{}: {}", field, message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{}", joined)
            }
        }
    }
}

/// The custom error type for the application.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from the sqlx library.
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A stored document could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A validation error with field-level details.
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// A not found error (resource does not exist).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A forbidden error (user lacks permission on the resource).
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    /// A conflict error (unique value already taken).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, expired or invalid token, or bad credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The primary mutation succeeded but a follow-up cascade did not.
    #[error("Partial failure: {0}")]
    PartialFailure(String),

    /// An internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    /// Shorthand for a single-field validation failure.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation(ValidationErrors::Single {
            field: field.into(),
            message: message.into(),
        })
    }

    /// Whether the error was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_)
                | Error::NotFound(_)
                | Error::Forbidden(_)
                | Error::Conflict(_)
                | Error::Unauthorized(_)
        )
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::Conflict(_) => StatusCode::CONFLICT,
            // Bad or expired credentials are reported as 403, matching the refresh flow clients expect.
            Error::Unauthorized(_) => StatusCode::FORBIDDEN,
            Error::PartialFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::validation("body", rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::validation("path", rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::validation("query", rejection.body_text())
    }
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;

/// Convert custom Error to HTTP response
///
/// Each variant maps to a status code and a JSON body with an `error` message
/// and a machine-readable `code`. Server-side details are never echoed back.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            Error::Validation(errors) => match errors {
                ValidationErrors::Single { field, message } => {
                    serde_json::json!({
                        "error": "Validation failed",
                        "code": "VALIDATION_ERROR",
                        "fields": {
                            field: message
                        }
                    })
                }
                ValidationErrors::Multiple { fields } => {
                    serde_json::json!({
                        "error": "Validation failed",
                        "code": "VALIDATION_ERROR",
                        "fields": fields
                    })
                }
            },
            Error::NotFound(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "NOT_FOUND"
                })
            }
            Error::Forbidden(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "FORBIDDEN"
                })
            }
            Error::Conflict(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "CONFLICT"
                })
            }
            Error::Unauthorized(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "UNAUTHORIZED"
                })
            }
            Error::PartialFailure(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "PARTIAL_FAILURE"
                })
            }
            Error::Sqlx(_) | Error::Serialization(_) | Error::Internal(_) => {
                serde_json::json!({
                    "error": "Internal server error",
                    "code": "INTERNAL_ERROR"
                })
            }
            Error::Config(_) => {
                serde_json::json!({
                    "error": "Configuration error",
                    "code": "CONFIG_ERROR"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
