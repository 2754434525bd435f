pub mod cipher_error;
pub mod claims;
pub mod credential_cipher;
pub mod error;
pub mod internal_token;
pub mod jwt_validator;

pub use cipher_error::{CipherError, Result as CipherResult};
pub use claims::Claims;
pub use credential_cipher::CredentialCipher;
pub use error::{AuthError, Result};
pub use internal_token::InternalTokenVerifier;
pub use jwt_validator::JwtValidator;
