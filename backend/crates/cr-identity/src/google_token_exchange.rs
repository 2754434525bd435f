use crate::{AccessGrant, PlatformApiError, PlatformApiResult, TokenExchange};

use cr_config::YoutubeConfig;
use cr_core::PlatformType;

use std::panic::Location;
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use reqwest::{Client as ReqwestClient, StatusCode, header};
use serde::Deserialize;
use zeroize::Zeroizing;

/// OAuth error code for a revoked or expired refresh token
const INVALID_GRANT: &str = "invalid_grant";

/// Refresh-token grant against Google's OAuth token endpoint
pub struct GoogleTokenExchange {
    client: ReqwestClient,
    token_url: String,
    client_id: Option<String>,
    client_secret: Option<Zeroizing<String>>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    error: Option<String>,
    error_description: Option<String>,
}

impl GoogleTokenExchange {
    pub fn new(
        token_url: &str,
        client_id: Option<String>,
        client_secret: Option<String>,
        timeout: Duration,
    ) -> PlatformApiResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(PlatformApiError::from_reqwest)?;

        Ok(Self {
            client,
            token_url: token_url.to_string(),
            client_id,
            client_secret: client_secret.map(Zeroizing::new),
        })
    }

    pub fn from_config(config: &YoutubeConfig) -> PlatformApiResult<Self> {
        Self::new(
            &config.token_url,
            config.client_id.clone(),
            config.client_secret.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    #[track_caller]
    fn credentials(&self) -> PlatformApiResult<(&str, &str)> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Ok((id.as_str(), secret.as_str())),
            _ => Err(PlatformApiError::NotConfigured {
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

#[async_trait]
impl TokenExchange for GoogleTokenExchange {
    async fn exchange(
        &self,
        platform: PlatformType,
        refresh_token: &str,
    ) -> PlatformApiResult<AccessGrant> {
        if platform != PlatformType::Youtube {
            return Err(PlatformApiError::unsupported(platform));
        }

        let (client_id, client_secret) = self.credentials()?;

        let form = Zeroizing::new(
            url::form_urlencoded::Serializer::new(String::new())
                .append_pair("grant_type", "refresh_token")
                .append_pair("refresh_token", refresh_token)
                .append_pair("client_id", client_id)
                .append_pair("client_secret", client_secret)
                .finish(),
        );

        let response = self
            .client
            .post(&self.token_url)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form.as_str().to_owned())
            .send()
            .await
            .map_err(PlatformApiError::from_reqwest)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PlatformApiError::Unauthorized {
                status: status.as_u16(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let body = response
            .text()
            .await
            .map_err(PlatformApiError::from_reqwest)?;

        let parsed: TokenResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => TokenResponse::default(),
            Err(e) => return Err(PlatformApiError::from_json(e)),
        };

        if parsed.error.as_deref() == Some(INVALID_GRANT) {
            return Err(PlatformApiError::InvalidGrant {
                message: parsed
                    .error_description
                    .unwrap_or_else(|| INVALID_GRANT.to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !status.is_success() {
            return Err(PlatformApiError::Status {
                status: status.as_u16(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let access_token = parsed
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| PlatformApiError::MissingAccessToken {
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(AccessGrant {
            access_token: Zeroizing::new(access_token),
            refresh_token: parsed
                .refresh_token
                .filter(|token| !token.is_empty())
                .map(Zeroizing::new),
            expires_in: parsed.expires_in,
        })
    }
}
