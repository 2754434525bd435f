use crate::ErrorCategory;

use serde::{Deserialize, Serialize};

/// Verified platform profile returned to third parties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformProfile {
    pub platform_id: String,
    pub display_name: String,
    /// Follower/subscriber count in compact display form (`1.2K`, `2.5M`)
    pub normalized_count: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFailure {
    pub error_category: ErrorCategory,
    pub message: String,
}

/// Outcome of a platform profile request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProfileResult {
    Success(PlatformProfile),
    Failure(ProfileFailure),
}

impl ProfileResult {
    pub fn failure(error_category: ErrorCategory, message: impl Into<String>) -> Self {
        Self::Failure(ProfileFailure {
            error_category,
            message: message.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Category of a failed result, `None` on success
    pub fn error_category(&self) -> Option<ErrorCategory> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure.error_category),
        }
    }
}

impl<E> From<Result<PlatformProfile, E>> for ProfileResult
where
    E: Into<ProfileFailure>,
{
    fn from(result: Result<PlatformProfile, E>) -> Self {
        match result {
            Ok(profile) => Self::Success(profile),
            Err(e) => Self::Failure(e.into()),
        }
    }
}
