use crate::ErrorCategory;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SovereigntyFailure {
    pub error_category: ErrorCategory,
    pub message: String,
}

/// Outcome of an irreversible identity deletion.
///
/// On failure the identity is left fully intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SovereigntyResult {
    Success,
    Failure(SovereigntyFailure),
}

impl SovereigntyResult {
    pub fn failure(error_category: ErrorCategory, message: impl Into<String>) -> Self {
        Self::Failure(SovereigntyFailure {
            error_category,
            message: message.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn error_category(&self) -> Option<ErrorCategory> {
        match self {
            Self::Success => None,
            Self::Failure(failure) => Some(failure.error_category),
        }
    }
}
