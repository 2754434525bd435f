use crate::Config;
use crate::tests::{EnvGuard, required_secrets, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - YouTube client
// =========================================================================

#[test]
#[serial]
fn given_client_id_without_secret_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secrets = required_secrets();
    let _id = EnvGuard::set("CR_YOUTUBE_CLIENT_ID", "client-id");
    let _secret = EnvGuard::remove("CR_YOUTUBE_CLIENT_SECRET");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("set together"));
}

#[test]
#[serial]
fn given_timeout_out_of_range_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secrets = required_secrets();
    let _timeout = EnvGuard::set("CR_YOUTUBE_REQUEST_TIMEOUT_SECS", "0");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_non_http_token_url_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secrets = required_secrets();
    let _url = EnvGuard::set("CR_YOUTUBE_TOKEN_URL", "ftp://example.com/token");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("youtube.token_url"));
}

#[test]
#[serial]
fn given_local_mock_urls_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secrets = required_secrets();
    let _token = EnvGuard::set("CR_YOUTUBE_TOKEN_URL", "http://127.0.0.1:9999/token");
    let _api = EnvGuard::set("CR_YOUTUBE_API_BASE_URL", "http://127.0.0.1:9999/youtube/v3");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, ok(anything()));
}
