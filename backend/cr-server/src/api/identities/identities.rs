//! Identity REST API handlers for the sign-in framework and linking orchestrator

use crate::{
    ApiResult, AppState, IdentityDto, InternalAccess, LinkRequest, LinkedAccountDto,
};

use cr_core::NewIdentity;

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

/// POST /internal/identities
///
/// Create the identity on first sign-in, or return the existing one
pub async fn provision_identity(
    _access: InternalAccess,
    State(state): State<AppState>,
    Json(profile): Json<NewIdentity>,
) -> ApiResult<Json<IdentityDto>> {
    let identity = state.provisioner.provision(profile).await?;

    Ok(Json(identity.into()))
}

/// POST /internal/identities/{id}/links
///
/// Record a completed OAuth handshake for the identity
pub async fn link_account(
    _access: InternalAccess,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<LinkRequest>,
) -> ApiResult<Json<LinkedAccountDto>> {
    let identity_id = Uuid::parse_str(&id)?;

    let account = state.linker.on_link(identity_id, request.into()).await?;

    Ok(Json(account.into()))
}
