use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

async fn database_reachable(state: &AppState) -> bool {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => true,
        Err(e) => {
            log::warn!("Database health check failed: {}", e);
            false
        }
    }
}

/// GET /health - Health check with component status
pub async fn health_check(State(state): State<AppState>) -> Response {
    let database_ok = database_reachable(&state).await;

    let health = json!({
        "status": if database_ok { "healthy" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "database": if database_ok { "operational" } else { "unavailable" },
            "internal_routes": if state.auth.internal_token.is_enabled() {
                "enabled"
            } else {
                "disabled"
            },
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - Liveness probe (is the process alive?)
pub async fn liveness_check() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - Readiness probe, fails while the database is unreachable
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    if database_reachable(&state).await {
        (StatusCode::OK, "Ready").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable").into_response()
    }
}
