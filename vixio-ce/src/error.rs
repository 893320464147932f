//! Error types for vixio-ce
//!
//! One error type for the whole service. Handlers return it directly; the
//! `IntoResponse` impl decides the HTTP status.
//!
//! Claim races are NOT errors: the losing caller simply gets an empty claim.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Main error type for vixio-ce
#[derive(Error, Debug)]
pub enum Error {
    /// Caller-supplied field is malformed or of the wrong type (400)
    #[error("Validation failed for '{field}': {message} (expected {expected})")]
    Validation {
        field: String,
        expected: String,
        message: String,
    },

    /// Request body could not be parsed at all (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Server-side resource missing, e.g. a schema document (500)
    #[error("Not found: {0}")]
    NotFound(String),

    /// A collaborator service was unreachable or answered unexpectedly (502)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client construction errors
    #[error("HTTP client error: {0}")]
    Http(String),

    /// vixio-common error
    #[error(transparent)]
    Common(#[from] vixio_common::Error),
}

impl Error {
    /// Build a validation error for a single offending field
    pub fn validation(
        field: impl Into<String>,
        expected: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Validation {
            field: field.into(),
            expected: expected.into(),
            message: message.into(),
        }
    }

    /// True for errors attributable to the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation { .. } | Error::BadRequest(_))
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Error::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Error::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            // Missing server-side resources are misconfiguration, not caller fault
            Error::NotFound(_) => (StatusCode::INTERNAL_SERVER_ERROR, "NOT_FOUND"),
            Error::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            Error::Http(_) => (StatusCode::INTERNAL_SERVER_ERROR, "HTTP_ERROR"),
            Error::Common(_) => (StatusCode::INTERNAL_SERVER_ERROR, "COMMON_ERROR"),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if !self.is_client_error() {
            warn!("Request failed: {}", self);
        }

        let body = match &self {
            Error::Validation {
                field,
                expected,
                message,
            } => json!({
                "error": {
                    "code": code,
                    "message": message,
                    "field": field,
                    "expected": expected,
                }
            }),
            other => json!({
                "error": {
                    "code": code,
                    "message": other.to_string(),
                }
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// Convenience Result type using vixio-ce Error
pub type Result<T> = std::result::Result<T, Error>;
