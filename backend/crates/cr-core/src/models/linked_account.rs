//! Linked account entity - one external platform credential per identity.

use crate::PlatformType;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Association between an identity and an external platform account.
///
/// The refresh credential is only ever held as ciphertext. `None` means the
/// account is awaiting reauthorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedAccount {
    pub id: Uuid,
    pub identity_id: Uuid,
    /// Raw provider name as reported by the OAuth orchestrator
    pub provider: String,
    pub external_account_id: String,
    /// `None` for providers that could not be classified
    pub platform_type: Option<PlatformType>,
    #[serde(skip_serializing)]
    pub encrypted_refresh_token: Option<String>,
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkedAccount {
    /// Account has no stored refresh credential and must be relinked
    pub fn awaiting_reauthorization(&self) -> bool {
        self.encrypted_refresh_token.is_none()
    }
}
