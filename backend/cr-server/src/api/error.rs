//! REST API error types
//!
//! These errors produce consistent JSON responses with appropriate HTTP
//! status codes. Engine results that are already tagged (`ProfileResult`,
//! `SovereigntyResult`, ...) go through [`crate::api::tagged_response`]
//! instead.

use cr_core::{CoreError, ErrorCategory};
use cr_identity::IdentityError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// No valid session (401)
    #[error("Not authenticated: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Caller is authenticated but not allowed (403)
    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Unique constraint collision (409)
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal { .. } => log::error!("{}", self),
            _ => log::debug!("{}", self),
        }

        let (status, body) = match self {
            ApiError::Unauthorized { message, .. } => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "UNAUTHORIZED".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Forbidden { message, .. } => (
                StatusCode::FORBIDDEN,
                ApiErrorBody {
                    code: "FORBIDDEN".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::NotFound { message, .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Validation { message, field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "VALIDATION_ERROR".into(),
                    message,
                    field,
                },
            ),
            ApiError::Conflict { message, .. } => (
                StatusCode::CONFLICT,
                ApiErrorBody {
                    code: "CONFLICT".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".into(),
                    message,
                    field: None,
                },
            ),
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Convert engine errors to API errors
impl From<IdentityError> for ApiError {
    #[track_caller]
    fn from(e: IdentityError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        let message = e.user_message();

        match e.category() {
            ErrorCategory::NotAuthenticated => ApiError::Unauthorized { message, location },
            ErrorCategory::Forbidden => ApiError::Forbidden { message, location },
            ErrorCategory::NotFound => ApiError::NotFound { message, location },
            ErrorCategory::Validation => ApiError::Validation {
                message,
                field: e.field().map(str::to_string),
                location,
            },
            ErrorCategory::Conflict => ApiError::Conflict { message, location },
            _ => {
                log::error!("Engine error: {}", e);
                ApiError::Internal { message, location }
            }
        }
    }
}

/// Convert domain parse errors (bad platform segment, bad handle) to API errors
impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        let field = match &e {
            CoreError::InvalidPlatformType { .. } => Some("platform".to_string()),
            CoreError::InvalidUsername { .. } => Some("username".to_string()),
            _ => None,
        };
        ApiError::Validation {
            message: e.user_message(),
            field,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convert UUID parse errors to API errors
impl From<uuid::Error> for ApiError {
    #[track_caller]
    fn from(e: uuid::Error) -> Self {
        ApiError::Validation {
            message: format!("Invalid UUID format: {}", e),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
