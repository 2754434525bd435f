use crate::{AppState, AuthState};

use cr_auth::{CredentialCipher, InternalTokenVerifier, JwtValidator};
use cr_core::PlatformType;
use cr_identity::{
    AccessGrant, ChannelSnapshot, PlatformApiError, PlatformApiResult, PlatformDataApi,
    TokenExchange,
};

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const TEST_JWT_SECRET: &str = "unit-test-jwt-secret-at-least-32-bytes-long";
pub const TEST_INTERNAL_TOKEN: &str = "unit-test-internal-token-32-characters!";

/// Platform client that is never expected to be reached in unit tests
struct Unreachable;

#[async_trait]
impl TokenExchange for Unreachable {
    async fn exchange(&self, platform: PlatformType, _: &str) -> PlatformApiResult<AccessGrant> {
        Err(PlatformApiError::unsupported(platform))
    }
}

#[async_trait]
impl PlatformDataApi for Unreachable {
    async fn fetch_channel(
        &self,
        platform: PlatformType,
        _: &str,
    ) -> PlatformApiResult<ChannelSnapshot> {
        Err(PlatformApiError::unsupported(platform))
    }
}

pub async fn create_test_state(internal_token: Option<&str>) -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(SqliteConnectOptions::new().filename(":memory:").foreign_keys(true))
        .await
        .expect("Failed to create test pool");
    cr_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    AppState::new(
        pool,
        Arc::new(CredentialCipher::new([1u8; 32])),
        AuthState {
            jwt_validator: JwtValidator::with_hs256(TEST_JWT_SECRET.as_bytes()),
            internal_token: InternalTokenVerifier::new(internal_token.map(str::to_string)),
            session_cookie: "session".to_string(),
        },
        Arc::new(Unreachable),
        Arc::new(Unreachable),
    )
}
