use crate::tests::support::{TEST_INTERNAL_TOKEN, TEST_JWT_SECRET, create_test_state};
use crate::{Caller, INTERNAL_TOKEN_HEADER, InternalAccess};

use cr_auth::Claims;

use axum::{body::Body, extract::FromRequestParts, http::Request};
use chrono::Utc;
use googletest::prelude::*;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

fn token_for(sub: &str, secret: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        exp: now + 3600,
        iat: now,
        name: None,
        email: None,
        picture: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

async fn extract_caller(request: Request<Body>) -> Option<Uuid> {
    let state = create_test_state(None).await;
    let (mut parts, _body) = request.into_parts();
    let Caller(caller) = Caller::from_request_parts(&mut parts, &state).await.unwrap();
    caller
}

#[tokio::test]
async fn given_valid_bearer_token_when_extracting_caller_then_identity_id() {
    // Given
    let id = Uuid::new_v4();
    let request = Request::builder()
        .header("Authorization", format!("Bearer {}", token_for(&id.to_string(), TEST_JWT_SECRET)))
        .body(Body::empty())
        .unwrap();

    // When
    let caller = extract_caller(request).await;

    // Then
    assert_that!(caller, some(eq(id)));
}

#[tokio::test]
async fn given_session_cookie_when_extracting_caller_then_identity_id() {
    // Given
    let id = Uuid::new_v4();
    let request = Request::builder()
        .header(
            "Cookie",
            format!("theme=dark; session={}", token_for(&id.to_string(), TEST_JWT_SECRET)),
        )
        .body(Body::empty())
        .unwrap();

    // When
    let caller = extract_caller(request).await;

    // Then
    assert_that!(caller, some(eq(id)));
}

#[tokio::test]
async fn given_token_signed_with_other_secret_when_extracting_caller_then_none() {
    // Given
    let request = Request::builder()
        .header(
            "Authorization",
            format!(
                "Bearer {}",
                token_for(&Uuid::new_v4().to_string(), "a-different-secret-also-32-bytes-long!!")
            ),
        )
        .body(Body::empty())
        .unwrap();

    // When
    let caller = extract_caller(request).await;

    // Then
    assert_that!(caller, none());
}

#[tokio::test]
async fn given_non_uuid_subject_when_extracting_caller_then_none() {
    // Given
    let request = Request::builder()
        .header("Authorization", format!("Bearer {}", token_for("user-42", TEST_JWT_SECRET)))
        .body(Body::empty())
        .unwrap();

    // When
    let caller = extract_caller(request).await;

    // Then
    assert_that!(caller, none());
}

#[tokio::test]
async fn given_no_credentials_when_extracting_caller_then_none() {
    // Given
    let request = Request::builder().body(Body::empty()).unwrap();

    // When
    let caller = extract_caller(request).await;

    // Then
    assert_that!(caller, none());
}

#[tokio::test]
async fn given_matching_internal_token_when_extracting_access_then_granted() {
    // Given
    let state = create_test_state(Some(TEST_INTERNAL_TOKEN)).await;
    let request = Request::builder()
        .header(INTERNAL_TOKEN_HEADER, TEST_INTERNAL_TOKEN)
        .body(Body::empty())
        .unwrap();
    let (mut parts, _body) = request.into_parts();

    // When
    let result = InternalAccess::from_request_parts(&mut parts, &state).await;

    // Then
    assert!(result.is_ok());
}

#[tokio::test]
async fn given_wrong_internal_token_when_extracting_access_then_rejected() {
    // Given
    let state = create_test_state(Some(TEST_INTERNAL_TOKEN)).await;
    let request = Request::builder()
        .header(INTERNAL_TOKEN_HEADER, "wrong-token")
        .body(Body::empty())
        .unwrap();
    let (mut parts, _body) = request.into_parts();

    // When
    let result = InternalAccess::from_request_parts(&mut parts, &state).await;

    // Then
    assert!(result.is_err());
}

#[tokio::test]
async fn given_unset_internal_token_when_extracting_access_then_every_call_rejected() {
    // Given
    let state = create_test_state(None).await;
    let request = Request::builder()
        .header(INTERNAL_TOKEN_HEADER, "")
        .body(Body::empty())
        .unwrap();
    let (mut parts, _body) = request.into_parts();

    // When
    let result = InternalAccess::from_request_parts(&mut parts, &state).await;

    // Then
    assert!(result.is_err());
}
