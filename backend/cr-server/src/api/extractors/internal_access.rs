//! Guard for routes called by the sign-in framework and linking orchestrator

use crate::{ApiError, AppState};

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};

pub const INTERNAL_TOKEN_HEADER: &str = "X-Internal-Token";

/// Proof that the request carried the shared internal token.
///
/// Every request is refused while `auth.internal_token` is unset.
pub struct InternalAccess;

impl FromRequestParts<AppState> for InternalAccess {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let presented = parts
                .headers
                .get(INTERNAL_TOKEN_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();

            if state.auth.internal_token.verify(presented) {
                Ok(InternalAccess)
            } else {
                log::warn!("Rejected internal call to {}", parts.uri.path());
                Err(ApiError::forbidden("Invalid internal token"))
            }
        }
    }
}
