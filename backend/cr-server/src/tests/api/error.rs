use crate::ApiError;

use cr_core::CoreError;
use cr_identity::IdentityError;

use std::panic::Location;

use axum::{http::StatusCode, response::IntoResponse};
use error_location::ErrorLocation;
use googletest::prelude::*;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn given_validation_error_when_rendered_then_400_with_field() {
    // Given
    let error: ApiError = IdentityError::validation("Image URL must start with http.", Some("image_url")).into();

    // When
    let (status, json) = body_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_that!(json["error"]["code"].as_str(), some(eq("VALIDATION_ERROR")));
    assert_that!(json["error"]["field"].as_str(), some(eq("image_url")));
}

#[tokio::test]
async fn given_not_authenticated_error_when_converted_then_401() {
    // Given
    let error: ApiError = IdentityError::not_authenticated().into();

    // When
    let (status, json) = body_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_that!(json["error"]["code"].as_str(), some(eq("UNAUTHORIZED")));
}

#[tokio::test]
async fn given_conflict_error_when_converted_then_409() {
    // Given
    let error: ApiError = IdentityError::Conflict {
        message: "This username is already taken.".to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    // When
    let (status, json) = body_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::CONFLICT));
    assert_that!(
        json["error"]["message"].as_str(),
        some(eq("This username is already taken."))
    );
}

#[tokio::test]
async fn given_unknown_platform_when_converted_then_validation_on_platform_field() {
    // Given
    let parse_error = "myspace".parse::<cr_core::PlatformType>().unwrap_err();
    assert!(matches!(parse_error, CoreError::InvalidPlatformType { .. }));
    let error: ApiError = parse_error.into();

    // When
    let (status, json) = body_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_that!(json["error"]["field"].as_str(), some(eq("platform")));
}

#[tokio::test]
async fn given_internal_error_when_rendered_then_500() {
    // Given
    let error = ApiError::internal("boom");

    // When
    let (status, _) = body_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::INTERNAL_SERVER_ERROR));
}
