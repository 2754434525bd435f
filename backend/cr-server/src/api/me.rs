//! Self-service handlers for the signed-in identity

use crate::{AppState, Caller, tagged_response};

use cr_identity::ProfileUpdate;

use axum::{
    Json,
    extract::State,
    http::{HeaderValue, header},
    response::Response,
};

/// PATCH /api/v1/me
pub async fn update_me(
    Caller(caller): Caller,
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Response {
    let result = state.profile_editor.update_profile(caller, update).await;

    tagged_response(&result, result.error_category())
}

/// DELETE /api/v1/me
///
/// Irreversibly delete the caller's identity. On success the session cookie
/// is expired so the browser drops the dead session.
pub async fn delete_me(Caller(caller): Caller, State(state): State<AppState>) -> Response {
    // Without a caller the service answers NotAuthenticated before reading the target
    let target = caller.unwrap_or_default();
    let result = state.sovereignty.hard_delete(caller, target).await;

    let mut response = tagged_response(&result, result.error_category());

    if result.is_success() {
        let cookie = format!(
            "{}=; Path=/; Max-Age=0; HttpOnly; Secure; SameSite=Lax",
            state.auth.session_cookie
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().insert(header::SET_COOKIE, value);
            }
            Err(e) => log::error!("Invalid session cookie name {}: {}", state.auth.session_cookie, e),
        }
    }

    response
}
