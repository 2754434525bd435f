use crate::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid username '{value}': {message} {location}")]
    InvalidUsername {
        value: String,
        message: &'static str,
        location: ErrorLocation,
    },

    #[error("Invalid platform type: {value} {location}")]
    InvalidPlatformType {
        value: String,
        location: ErrorLocation,
    },

    #[error("UUID parse error: {source} {location}")]
    Uuid {
        source: uuid::Error,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// User-facing message without the source location suffix
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::InvalidUsername { message, .. } => (*message).to_string(),
            Self::InvalidPlatformType { value, .. } => format!("Unknown platform: {value}"),
            Self::Uuid { .. } => "Invalid identifier".to_string(),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
