use crate::{ConfigError, ConfigErrorResult, DEFAULT_SESSION_COOKIE, MIN_SECRET_LENGTH};

use serde::Deserialize;

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 secret used to verify session tokens
    pub jwt_secret: Option<String>,
    /// Shared secret the linking orchestrator presents on internal routes.
    /// Internal routes reject every call when unset.
    pub internal_token: Option<String>,
    /// Cookie cleared when an identity is deleted
    pub session_cookie: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            internal_token: None,
            session_cookie: String::from(DEFAULT_SESSION_COOKIE),
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match self.jwt_secret.as_deref() {
            None => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret is required to verify session tokens",
                ));
            }
            Some(secret) if secret.len() < MIN_SECRET_LENGTH => {
                return Err(ConfigError::auth(format!(
                    "auth.jwt_secret must be at least {} characters",
                    MIN_SECRET_LENGTH
                )));
            }
            Some(_) => {}
        }

        if let Some(token) = self.internal_token.as_deref()
            && token.len() < MIN_SECRET_LENGTH
        {
            return Err(ConfigError::auth(format!(
                "auth.internal_token must be at least {} characters",
                MIN_SECRET_LENGTH
            )));
        }

        if self.session_cookie.trim().is_empty() {
            return Err(ConfigError::auth("auth.session_cookie cannot be empty"));
        }

        Ok(())
    }
}

// Secrets stay out of debug output
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<set>"))
            .field(
                "internal_token",
                &self.internal_token.as_ref().map(|_| "<set>"),
            )
            .field("session_cookie", &self.session_cookie)
            .finish()
    }
}
