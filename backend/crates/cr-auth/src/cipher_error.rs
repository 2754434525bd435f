use cr_core::ErrorCategory;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failures of the credential cipher.
///
/// `Format` and `Integrity` mean the stored token can never decrypt under the
/// current key; callers must ask for reauthorization instead of retrying.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("Cipher configuration error: {message} {location}")]
    Configuration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Malformed ciphertext token: {message} {location}")]
    Format {
        message: String,
        location: ErrorLocation,
    },

    #[error("Ciphertext failed integrity check: {message} {location}")]
    Integrity {
        message: String,
        location: ErrorLocation,
    },

    #[error("Encryption failed {location}")]
    Encryption { location: ErrorLocation },
}

impl CipherError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Format { .. } => ErrorCategory::Format,
            Self::Integrity { .. } => ErrorCategory::Integrity,
            Self::Configuration { .. } | Self::Encryption { .. } => ErrorCategory::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, CipherError>;
