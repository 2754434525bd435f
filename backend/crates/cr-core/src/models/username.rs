//! Public handles.
//!
//! A [`Username`] can only be obtained through [`Username::parse`], so any
//! value of this type is already trimmed, case-folded and free of reserved
//! words. Availability is a separate concern owned by the persistence layer.

use crate::{CoreError, CoreResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Deserializer, Serialize};

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 30;

/// Handles that would collide with application routes
pub const RESERVED_USERNAMES: &[&str] = &[
    "admin", "api", "auth", "settings", "invoices", "home", "dashboard", "profile", "account",
    "curately", "support", "help", "about", "terms", "privacy", "legal",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Validate and normalize a candidate handle
    #[track_caller]
    pub fn parse(candidate: &str) -> CoreResult<Self> {
        let normalized = candidate.trim().to_lowercase();

        let reject = |message: &'static str| CoreError::InvalidUsername {
            value: normalized.clone(),
            message,
            location: ErrorLocation::from(Location::caller()),
        };

        let length = normalized.chars().count();
        if length < MIN_USERNAME_LENGTH {
            return Err(reject("Username must be at least 3 characters."));
        }
        if length > MAX_USERNAME_LENGTH {
            return Err(reject("Username must be 30 characters or less."));
        }
        if !normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(reject(
                "Username can only contain letters, numbers, and underscores.",
            ));
        }
        if RESERVED_USERNAMES.contains(&normalized.as_str()) {
            return Err(reject("This username is reserved."));
        }

        Ok(Self(normalized))
    }

    /// Wrap a handle read back from storage, where it was validated on write
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for Username {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Username::parse(&raw).map_err(|e| serde::de::Error::custom(e.user_message()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
