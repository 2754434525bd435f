//! Axum extractor for the calling identity

use crate::AppState;

use cr_auth::JwtValidator;

use std::convert::Infallible;
use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use uuid::Uuid;

/// Identity id of the session behind this request, `None` when there is no
/// valid session.
///
/// Never rejects: the engine decides what an unauthenticated caller gets.
/// The token is read from `Authorization: Bearer`, then from the session cookie.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Option<Uuid>);

impl FromRequestParts<AppState> for Caller {
    type Rejection = Infallible;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let Some(token) = session_token(&parts.headers, &state.auth.session_cookie) else {
                return Ok(Caller(None));
            };

            let claims = match state.auth.jwt_validator.validate(&token) {
                Ok(claims) => claims,
                Err(e) => {
                    log::debug!("Rejected session token: {}", e);
                    return Ok(Caller(None));
                }
            };

            match claims.identity_id() {
                Some(id) => Ok(Caller(Some(id))),
                None => {
                    log::warn!("Session subject is not an identity id: {}", claims.sub);
                    Ok(Caller(None))
                }
            }
        }
    }
}

fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        return value
            .to_str()
            .ok()
            .and_then(|v| JwtValidator::bearer_token(v).ok())
            .map(str::to_string);
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}
