use serde::{Deserialize, Serialize};

/// Failure categories surfaced to collaborators.
///
/// Categories are deliberately coarse: callers decide which affordance to
/// render (connect, reauthorize, retry) from the category alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    NotAuthenticated,
    Forbidden,
    NotFound,
    NotLinked,
    MissingCredential,
    /// Stored ciphertext failed authentication (tamper or key mismatch)
    Integrity,
    /// Stored ciphertext is not in `iv:tag:ciphertext` form
    Format,
    /// Platform rejected the credential or scope
    ScopeOrAuth,
    Upstream,
    Conflict,
    Validation,
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "not_authenticated",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::NotLinked => "not_linked",
            Self::MissingCredential => "missing_credential",
            Self::Integrity => "integrity",
            Self::Format => "format",
            Self::ScopeOrAuth => "scope_or_auth",
            Self::Upstream => "upstream",
            Self::Conflict => "conflict",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// The user has to go through the OAuth flow again to recover
    pub fn requires_reauthorization(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential | Self::Integrity | Self::Format | Self::ScopeOrAuth
        )
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
