use crate::{status_for, tagged_response};

use cr_core::{ErrorCategory, PlatformProfile, ProfileResult, SovereigntyResult};

use axum::http::StatusCode;
use googletest::prelude::*;
use http_body_util::BodyExt;

async fn render<T: serde::Serialize>(
    body: &T,
    category: Option<ErrorCategory>,
) -> (StatusCode, serde_json::Value) {
    let response = tagged_response(body, category);
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn given_each_category_when_mapped_then_status_matches_contract() {
    let expected = [
        (ErrorCategory::NotAuthenticated, StatusCode::UNAUTHORIZED),
        (ErrorCategory::Forbidden, StatusCode::FORBIDDEN),
        (ErrorCategory::NotFound, StatusCode::NOT_FOUND),
        (ErrorCategory::NotLinked, StatusCode::NOT_FOUND),
        (ErrorCategory::MissingCredential, StatusCode::NOT_FOUND),
        (ErrorCategory::Conflict, StatusCode::CONFLICT),
        (ErrorCategory::Validation, StatusCode::BAD_REQUEST),
        (ErrorCategory::ScopeOrAuth, StatusCode::UNAUTHORIZED),
        (ErrorCategory::Integrity, StatusCode::UNAUTHORIZED),
        (ErrorCategory::Format, StatusCode::UNAUTHORIZED),
        (ErrorCategory::Upstream, StatusCode::BAD_GATEWAY),
        (ErrorCategory::Internal, StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (category, status) in expected {
        assert_that!(status_for(category), eq(status));
    }
}

#[tokio::test]
async fn given_success_when_rendered_then_200_with_status_tag() {
    // Given
    let result = ProfileResult::Success(PlatformProfile {
        platform_id: "UC1".to_string(),
        display_name: "Channel".to_string(),
        normalized_count: "1.2K".to_string(),
    });

    // When
    let (status, json) = render(&result, result.error_category()).await;

    // Then
    assert_that!(status, eq(StatusCode::OK));
    assert_that!(json["status"].as_str(), some(eq("success")));
    assert_that!(json["normalized_count"].as_str(), some(eq("1.2K")));
    assert_that!(json.get("reauthorize"), none());
}

#[tokio::test]
async fn given_integrity_failure_when_rendered_then_401_with_reauthorize() {
    // Given
    let result = ProfileResult::failure(ErrorCategory::Integrity, "Security Error: Key Mismatch");

    // When
    let (status, json) = render(&result, result.error_category()).await;

    // Then
    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_that!(json["status"].as_str(), some(eq("failure")));
    assert_that!(json["error_category"].as_str(), some(eq("integrity")));
    assert_that!(json["reauthorize"].as_bool(), some(eq(true)));
}

#[tokio::test]
async fn given_upstream_failure_when_rendered_then_502_without_reauthorize() {
    // Given
    let result = ProfileResult::failure(ErrorCategory::Upstream, "YouTube API error: 503");

    // When
    let (status, json) = render(&result, result.error_category()).await;

    // Then
    assert_that!(status, eq(StatusCode::BAD_GATEWAY));
    assert_that!(json.get("reauthorize"), none());
}

#[tokio::test]
async fn given_sovereignty_success_when_rendered_then_only_status_tag() {
    // Given
    let result = SovereigntyResult::Success;

    // When
    let (status, json) = render(&result, result.error_category()).await;

    // Then
    assert_that!(status, eq(StatusCode::OK));
    assert_that!(json, eq(&serde_json::json!({ "status": "success" })));
}
