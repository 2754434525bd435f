//! HTTP rendering of the engine's tagged results

use cr_core::ErrorCategory;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use crate::ApiError;

pub fn status_for(category: ErrorCategory) -> StatusCode {
    match category {
        ErrorCategory::NotAuthenticated => StatusCode::UNAUTHORIZED,
        ErrorCategory::Forbidden => StatusCode::FORBIDDEN,
        ErrorCategory::NotFound | ErrorCategory::NotLinked | ErrorCategory::MissingCredential => {
            StatusCode::NOT_FOUND
        }
        ErrorCategory::Conflict => StatusCode::CONFLICT,
        ErrorCategory::Validation => StatusCode::BAD_REQUEST,
        ErrorCategory::ScopeOrAuth | ErrorCategory::Integrity | ErrorCategory::Format => {
            StatusCode::UNAUTHORIZED
        }
        ErrorCategory::Upstream => StatusCode::BAD_GATEWAY,
        ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Serialize `body` with the status its failure category maps to (200 when
/// `category` is `None`). Failures the user can only fix by relinking carry
/// `"reauthorize": true`.
pub fn tagged_response<T: Serialize>(body: &T, category: Option<ErrorCategory>) -> Response {
    let mut value = match serde_json::to_value(body) {
        Ok(value) => value,
        Err(e) => return ApiError::internal(format!("Failed to encode response: {e}")).into_response(),
    };

    if let Some(category) = category
        && category.requires_reauthorization()
        && let Value::Object(map) = &mut value
    {
        map.insert("reauthorize".to_string(), Value::Bool(true));
    }

    let status = category.map(status_for).unwrap_or(StatusCode::OK);
    (status, Json(value)).into_response()
}
