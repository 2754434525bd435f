use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_YOUTUBE_API_BASE_URL,
    DEFAULT_YOUTUBE_TOKEN_URL, MAX_REQUEST_TIMEOUT_SECS, MIN_REQUEST_TIMEOUT_SECS,
};

use serde::Deserialize;

/// Google OAuth client and YouTube Data API endpoints
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct YoutubeConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token_url: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            token_url: String::from(DEFAULT_YOUTUBE_TOKEN_URL),
            api_base_url: String::from(DEFAULT_YOUTUBE_API_BASE_URL),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl YoutubeConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (name, url) in [
            ("youtube.token_url", &self.token_url),
            ("youtube.api_base_url", &self.api_base_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::platform(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        if !(MIN_REQUEST_TIMEOUT_SECS..=MAX_REQUEST_TIMEOUT_SECS)
            .contains(&self.request_timeout_secs)
        {
            return Err(ConfigError::platform(format!(
                "youtube.request_timeout_secs must be {}-{}, got {}",
                MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS, self.request_timeout_secs
            )));
        }

        // A half-configured OAuth client is always a mistake
        if self.client_id.is_some() != self.client_secret.is_some() {
            return Err(ConfigError::platform(
                "youtube.client_id and youtube.client_secret must be set together",
            ));
        }

        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }
}

impl std::fmt::Debug for YoutubeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeConfig")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<set>"),
            )
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
