//! Seams to the external platform endpoints.
//!
//! The engine never builds HTTP requests itself; it is handed a
//! [`TokenExchange`] and a [`PlatformDataApi`] at construction so tests can
//! substitute fakes.

use crate::PlatformApiResult;

use cr_core::PlatformType;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use zeroize::Zeroizing;

/// Fresh credentials returned by a token exchange
pub struct AccessGrant {
    pub access_token: Zeroizing<String>,
    /// Present when the provider rotated the refresh token
    pub refresh_token: Option<Zeroizing<String>>,
    /// Lifetime in seconds
    pub expires_in: Option<i64>,
}

impl AccessGrant {
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.expires_in
            .filter(|secs| *secs > 0)
            .and_then(Duration::try_seconds)
            .map(|lifetime| now + lifetime)
    }
}

impl std::fmt::Debug for AccessGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGrant")
            .field("access_token", &"<redacted>")
            .field("rotated", &self.refresh_token.is_some())
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Channel data as reported by the platform, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSnapshot {
    pub id: String,
    pub title: String,
    /// Raw count string, e.g. `"1234"`
    pub subscriber_count: String,
}

#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Trade a refresh token for a fresh access token
    async fn exchange(
        &self,
        platform: PlatformType,
        refresh_token: &str,
    ) -> PlatformApiResult<AccessGrant>;
}

#[async_trait]
pub trait PlatformDataApi: Send + Sync {
    /// Fetch the channel owned by the bearer of `access_token`
    async fn fetch_channel(
        &self,
        platform: PlatformType,
        access_token: &str,
    ) -> PlatformApiResult<ChannelSnapshot>;
}
