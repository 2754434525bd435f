use crate::{AppState, Caller};

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// GET /api/v1/usernames/{candidate}
///
/// Advisory availability check; the claim itself can still conflict
pub async fn check_username(
    Caller(caller): Caller,
    State(state): State<AppState>,
    Path(candidate): Path<String>,
) -> Response {
    let result = state.usernames.check_availability(caller, &candidate).await;

    let status = if caller.is_some() {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };

    (status, Json(result)).into_response()
}
