use cr_core::{ErrorCategory, PlatformType};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failures talking to a platform's token or data endpoint
#[derive(Error, Debug)]
pub enum PlatformApiError {
    #[error("Platform rejected credential with HTTP {status} {location}")]
    Unauthorized { status: u16, location: ErrorLocation },

    #[error("Refresh token rejected: {message} {location}")]
    InvalidGrant {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token response carried no access token {location}")]
    MissingAccessToken { location: ErrorLocation },

    #[error("Platform returned HTTP {status} {location}")]
    Status { status: u16, location: ErrorLocation },

    #[error("HTTP request error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response body: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("No channel found for this account {location}")]
    NoChannel { location: ErrorLocation },

    #[error("{platform} has no data client {location}")]
    Unsupported {
        platform: PlatformType,
        location: ErrorLocation,
    },

    #[error("Platform client credentials are not configured {location}")]
    NotConfigured { location: ErrorLocation },
}

impl PlatformApiError {
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        PlatformApiError::Transport {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        PlatformApiError::Decode {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unsupported(platform: PlatformType) -> Self {
        PlatformApiError::Unsupported {
            platform,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Authorization problems need the user to reconnect; everything else is upstream.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unauthorized { .. } | Self::InvalidGrant { .. } | Self::MissingAccessToken { .. } => {
                ErrorCategory::ScopeOrAuth
            }
            _ => ErrorCategory::Upstream,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized { .. } => {
                "OAuth Scope Missing: Ensure youtube.readonly is active".to_string()
            }
            Self::InvalidGrant { .. } | Self::MissingAccessToken { .. } => {
                "Stored authorization was rejected - reauthorize required".to_string()
            }
            Self::Status { status, .. } => format!("YouTube API error: {}", status),
            Self::Transport { .. } => "YouTube API unreachable".to_string(),
            Self::Decode { .. } => "Unexpected response from YouTube API".to_string(),
            Self::NoChannel { .. } => "No YouTube channel found".to_string(),
            Self::Unsupported { platform, .. } => {
                format!("{} profiles are unsupported", platform.display_name())
            }
            Self::NotConfigured { .. } => "YouTube API client is not configured".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlatformApiError>;
