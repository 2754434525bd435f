use cr_core::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Unique constraint violated: {message} {location}")]
    UniqueViolation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Corrupt row in {table}: {message} {location}")]
    CorruptRow {
        table: &'static str,
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }

    #[track_caller]
    pub(crate) fn corrupt(table: &'static str, message: impl Into<String>) -> Self {
        Self::CorruptRow {
            table,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if let sqlx::Error::Database(db_err) = &source
            && db_err.is_unique_violation()
        {
            return Self::UniqueViolation {
                message: db_err.message().to_string(),
                location,
            };
        }

        Self::Sqlx { source, location }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
