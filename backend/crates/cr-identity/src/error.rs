use cr_auth::CipherError;
use cr_core::{CoreError, ErrorCategory};
use cr_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Not authenticated {location}")]
    NotAuthenticated { location: ErrorLocation },

    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database error: {source} {location}")]
    Database {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Cipher error: {source} {location}")]
    Cipher {
        #[source]
        source: CipherError,
        location: ErrorLocation,
    },
}

impl IdentityError {
    #[track_caller]
    pub fn not_authenticated() -> Self {
        Self::NotAuthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation(message: impl Into<String>, field: Option<&str>) -> Self {
        Self::Validation {
            message: message.into(),
            field: field.map(str::to_string),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotAuthenticated { .. } => ErrorCategory::NotAuthenticated,
            Self::Forbidden { .. } => ErrorCategory::Forbidden,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::Conflict { .. } => ErrorCategory::Conflict,
            Self::Database { .. } => ErrorCategory::Internal,
            Self::Cipher { source, .. } => source.category(),
        }
    }

    /// Message safe to show to an end user (no locations, no internals)
    pub fn user_message(&self) -> String {
        match self {
            Self::NotAuthenticated { .. } => "Not authenticated - please sign in".to_string(),
            Self::Forbidden { message, .. }
            | Self::NotFound { message, .. }
            | Self::Validation { message, .. }
            | Self::Conflict { message, .. } => message.clone(),
            Self::Database { .. } | Self::Cipher { .. } => "Internal error".to_string(),
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

impl From<DbError> for IdentityError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        if source.is_unique_violation() {
            return Self::Conflict {
                message: "Record already exists".to_string(),
                location,
            };
        }
        Self::Database { source, location }
    }
}

impl From<sqlx::Error> for IdentityError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        DbError::from(source).into()
    }
}

impl From<CipherError> for IdentityError {
    #[track_caller]
    fn from(source: CipherError) -> Self {
        Self::Cipher {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for IdentityError {
    #[track_caller]
    fn from(err: CoreError) -> Self {
        let field = match &err {
            CoreError::InvalidUsername { .. } => Some("username"),
            CoreError::InvalidPlatformType { .. } => Some("platform"),
            _ => None,
        };
        Self::validation(err.user_message(), field)
    }
}

pub type Result<T> = std::result::Result<T, IdentityError>;
