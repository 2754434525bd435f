use crate::{AppState, InternalAccess};

use cr_auth::Claims;
use cr_core::EnrichedClaims;

use axum::{Json, extract::State};

/// POST /internal/sessions/resolve
///
/// Enrich session claims with durable identity attributes. Always succeeds;
/// store failures degrade to defaults inside the resolver.
pub async fn resolve_session(
    _access: InternalAccess,
    State(state): State<AppState>,
    Json(claims): Json<Claims>,
) -> Json<EnrichedClaims> {
    Json(state.session_resolver.resolve(claims).await)
}
