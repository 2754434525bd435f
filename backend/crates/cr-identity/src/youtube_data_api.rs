use crate::{ChannelSnapshot, PlatformApiError, PlatformApiResult, PlatformDataApi};

use cr_config::YoutubeConfig;
use cr_core::PlatformType;

use std::panic::Location;
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::Deserialize;

const DEFAULT_CHANNEL_TITLE: &str = "Unknown Channel";
const DEFAULT_SUBSCRIBER_COUNT: &str = "0";

/// YouTube Data API v3 client for the caller's own channel
pub struct YoutubeDataApi {
    client: ReqwestClient,
    api_base_url: String,
}

#[derive(Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Deserialize)]
struct ChannelItem {
    id: String,
    #[serde(default)]
    snippet: Option<ChannelSnippet>,
    #[serde(default)]
    statistics: Option<ChannelStatistics>,
}

#[derive(Deserialize)]
struct ChannelSnippet {
    title: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelStatistics {
    subscriber_count: Option<String>,
}

impl YoutubeDataApi {
    pub fn new(api_base_url: &str, timeout: Duration) -> PlatformApiResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(PlatformApiError::from_reqwest)?;

        Ok(Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &YoutubeConfig) -> PlatformApiResult<Self> {
        Self::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }
}

#[async_trait]
impl PlatformDataApi for YoutubeDataApi {
    async fn fetch_channel(
        &self,
        platform: PlatformType,
        access_token: &str,
    ) -> PlatformApiResult<ChannelSnapshot> {
        if platform != PlatformType::Youtube {
            return Err(PlatformApiError::unsupported(platform));
        }

        let url = format!(
            "{}/channels?part=snippet,statistics&mine=true",
            self.api_base_url
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
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
        if !status.is_success() {
            return Err(PlatformApiError::Status {
                status: status.as_u16(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let body = response
            .text()
            .await
            .map_err(PlatformApiError::from_reqwest)?;
        let parsed: ChannelListResponse =
            serde_json::from_str(&body).map_err(PlatformApiError::from_json)?;

        let channel = parsed
            .items
            .into_iter()
            .next()
            .ok_or_else(|| PlatformApiError::NoChannel {
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(ChannelSnapshot {
            id: channel.id,
            title: channel
                .snippet
                .and_then(|s| s.title)
                .unwrap_or_else(|| DEFAULT_CHANNEL_TITLE.to_string()),
            subscriber_count: channel
                .statistics
                .and_then(|s| s.subscriber_count)
                .unwrap_or_else(|| DEFAULT_SUBSCRIBER_COUNT.to_string()),
        })
    }
}
