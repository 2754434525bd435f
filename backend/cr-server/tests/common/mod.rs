#![allow(dead_code)]

//! Test infrastructure for cr-server API tests

use cr_auth::{Claims, CredentialCipher, InternalTokenVerifier, JwtValidator};
use cr_core::{Identity, LinkedAccount, NewIdentity, PlatformType};
use cr_db::{IdentityRepository, LinkedAccountRepository};
use cr_identity::{
    AccessGrant, ChannelSnapshot, PlatformApiError, PlatformApiResult, PlatformDataApi,
    TokenExchange,
};
use cr_server::{AppState, AuthState, INTERNAL_TOKEN_HEADER, build_router};

use std::panic::Location;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use chrono::Utc;
use error_location::ErrorLocation;
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;
use uuid::Uuid;
use zeroize::Zeroizing;

pub const TEST_JWT_SECRET: &str = "integration-test-jwt-secret-min-32-bytes";
pub const TEST_INTERNAL_TOKEN: &str = "integration-test-internal-token-32-chars";

/// Token endpoint double: succeeds unless built with `revoked()`
pub struct StubTokenExchange {
    revoked: bool,
}

#[async_trait]
impl TokenExchange for StubTokenExchange {
    async fn exchange(&self, _: PlatformType, _: &str) -> PlatformApiResult<AccessGrant> {
        if self.revoked {
            return Err(PlatformApiError::InvalidGrant {
                message: "Token has been expired or revoked.".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(AccessGrant {
            access_token: Zeroizing::new("ya29.stub".to_string()),
            refresh_token: None,
            expires_in: Some(3600),
        })
    }
}

pub struct StubDataApi;

#[async_trait]
impl PlatformDataApi for StubDataApi {
    async fn fetch_channel(&self, _: PlatformType, _: &str) -> PlatformApiResult<ChannelSnapshot> {
        Ok(ChannelSnapshot {
            id: "UC-stub".to_string(),
            title: "Stub Channel".to_string(),
            subscriber_count: "2500".to_string(),
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub cipher: Arc<CredentialCipher>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_options(Some(TEST_INTERNAL_TOKEN), false).await
    }

    pub async fn with_options(internal_token: Option<&str>, revoked_grants: bool) -> Self {
        let pool = SqlitePoolOptions::new()
            .max_connections(1) // In-memory needs single connection
            .connect_with(
                SqliteConnectOptions::new()
                    .filename(":memory:")
                    .foreign_keys(true),
            )
            .await
            .expect("Failed to create test database");
        cr_db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let cipher = Arc::new(CredentialCipher::new([9u8; 32]));
        let state = AppState::new(
            pool.clone(),
            cipher.clone(),
            AuthState {
                jwt_validator: JwtValidator::with_hs256(TEST_JWT_SECRET.as_bytes()),
                internal_token: InternalTokenVerifier::new(internal_token.map(str::to_string)),
                session_cookie: "session".to_string(),
            },
            Arc::new(StubTokenExchange {
                revoked: revoked_grants,
            }),
            Arc::new(StubDataApi),
        );

        Self {
            router: build_router(state),
            pool,
            cipher,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn bearer_for(identity_id: Uuid) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: identity_id.to_string(),
        exp: now + 3600,
        iat: now,
        name: None,
        email: None,
        picture: None,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();
    format!("Bearer {token}")
}

pub fn authed(method: &str, uri: &str, identity_id: Uuid) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, bearer_for(identity_id))
}

pub fn internal(method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(INTERNAL_TOKEN_HEADER, TEST_INTERNAL_TOKEN)
        .header(header::CONTENT_TYPE, "application/json")
}

pub fn json_body(value: serde_json::Value) -> Body {
    Body::from(value.to_string())
}

pub async fn read_json(response: Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn create_identity(pool: &SqlitePool) -> Identity {
    let identity = Identity::new(NewIdentity {
        email: Some(format!("{}@example.com", Uuid::new_v4())),
        display_name: Some("Server Test".to_string()),
        image: Some("https://example.com/p.png".to_string()),
    });
    IdentityRepository::create(pool, &identity)
        .await
        .expect("Failed to create identity");
    identity
}

pub async fn create_youtube_link(
    pool: &SqlitePool,
    cipher: &CredentialCipher,
    identity_id: Uuid,
) -> LinkedAccount {
    let now = Utc::now();
    let account = LinkedAccount {
        id: Uuid::new_v4(),
        identity_id,
        provider: "google".to_string(),
        external_account_id: format!("UC{}", Uuid::new_v4().simple()),
        platform_type: Some(PlatformType::Youtube),
        encrypted_refresh_token: Some(cipher.encrypt("1//server-test").unwrap()),
        access_token: None,
        expires_at: None,
        created_at: now,
        updated_at: now,
    };
    LinkedAccountRepository::upsert(pool, &account)
        .await
        .expect("Failed to create linked account");
    account
}
