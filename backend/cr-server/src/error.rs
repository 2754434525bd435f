use cr_auth::CipherError;
use cr_config::ConfigError;
use cr_db::DbError;
use cr_identity::PlatformApiError;

use thiserror::Error;

/// Startup failures. Any of these stops the process before a socket is bound.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Encryption key rejected: {0}")]
    Cipher(#[from] CipherError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Platform client error: {0}")]
    Platform(#[from] PlatformApiError),

    #[error("Required secret {name} is not set")]
    MissingSecret { name: &'static str },

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
