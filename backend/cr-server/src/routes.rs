use crate::{
    AppState, check_username, delete_me, get_platform_profile, health, link_account,
    provision_identity, resolve_session, update_me,
};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Sign-in framework and linking orchestrator (X-Internal-Token)
        .route("/internal/identities", post(provision_identity))
        .route("/internal/identities/{id}/links", post(link_account))
        .route("/internal/sessions/resolve", post(resolve_session))
        // Session-authenticated API
        .route(
            "/api/v1/platforms/{platform}/profile",
            get(get_platform_profile),
        )
        .route("/api/v1/usernames/{candidate}", get(check_username))
        .route("/api/v1/me", axum::routing::patch(update_me).delete(delete_me))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
