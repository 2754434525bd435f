use crate::{ApiResult, AppState, Caller, tagged_response};

use cr_core::PlatformType;

use axum::{
    extract::{Path, State},
    response::Response,
};

/// GET /api/v1/platforms/{platform}/profile
///
/// Verified profile for the caller's linked account on `platform`
pub async fn get_platform_profile(
    Caller(caller): Caller,
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> ApiResult<Response> {
    let platform: PlatformType = platform.parse()?;

    let result = state
        .refresh_client
        .get_platform_profile(caller, platform)
        .await;

    Ok(tagged_response(&result, result.error_category()))
}
