use crate::{AuthError, Claims, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

/// Clock skew tolerance in seconds
const LEEWAY_SECS: u64 = 30;

/// Verifies HS256 session tokens
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    /// Create validator with HS256 (symmetric secret)
    pub fn with_hs256(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = LEEWAY_SECS;
        validation.required_spec_claims = ["exp", "sub"].iter().map(|c| c.to_string()).collect();

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Validate JWT token and return claims
    #[track_caller]
    pub fn validate(&self, token: &str) -> AuthErrorResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::JwtDecode {
                        source: e,
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        token_data.claims.validate()?;

        Ok(token_data.claims)
    }

    /// Extract the token from an `Authorization: Bearer <token>` header value
    #[track_caller]
    pub fn bearer_token(header_value: &str) -> AuthErrorResult<&str> {
        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthError::InvalidScheme {
                location: ErrorLocation::from(Location::caller()),
            })?
            .trim();

        if token.is_empty() {
            return Err(AuthError::InvalidToken {
                message: "empty bearer token".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(token)
    }
}
