use crate::{CoreError, CoreResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// External social platform a linked account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlatformType {
    /// YouTube channel, linked through Google sign-in
    Youtube,
    /// Instagram business account
    Instagram,
    /// TikTok creator account
    Tiktok,
}

impl PlatformType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Youtube => "YOUTUBE",
            Self::Instagram => "INSTAGRAM",
            Self::Tiktok => "TIKTOK",
        }
    }

    /// Human-readable platform name for messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Youtube => "YouTube",
            Self::Instagram => "Instagram",
            Self::Tiktok => "TikTok",
        }
    }

    /// Classify a raw OAuth provider name.
    ///
    /// Returns `None` for providers this platform does not know about; such
    /// accounts are stored without a platform type.
    pub fn from_provider(provider: &str) -> Option<Self> {
        match provider.trim().to_ascii_lowercase().as_str() {
            "google" | "youtube" => Some(Self::Youtube),
            "instagram" | "instagram-business" | "facebook" => Some(Self::Instagram),
            "tiktok" | "tiktok-creator" => Some(Self::Tiktok),
            _ => None,
        }
    }
}

impl FromStr for PlatformType {
    type Err = CoreError;

    /// Parses the stored form (`YOUTUBE`) as well as URL path segments (`youtube`).
    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s.to_ascii_uppercase().as_str() {
            "YOUTUBE" => Ok(Self::Youtube),
            "INSTAGRAM" => Ok(Self::Instagram),
            "TIKTOK" => Ok(Self::Tiktok),
            _ => Err(CoreError::InvalidPlatformType {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for PlatformType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
