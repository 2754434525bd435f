use cr_core::LinkedAccount;

use serde::Serialize;

/// Linked account without any credential material
#[derive(Debug, Clone, Serialize)]
pub struct LinkedAccountDto {
    pub id: String,
    pub identity_id: String,
    pub provider: String,
    pub external_account_id: String,
    pub platform_type: Option<String>,
    pub awaiting_reauthorization: bool,
    pub expires_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<LinkedAccount> for LinkedAccountDto {
    fn from(account: LinkedAccount) -> Self {
        Self {
            awaiting_reauthorization: account.awaiting_reauthorization(),
            id: account.id.to_string(),
            identity_id: account.identity_id.to_string(),
            provider: account.provider,
            external_account_id: account.external_account_id,
            platform_type: account.platform_type.map(|p| p.as_str().to_string()),
            expires_at: account.expires_at.map(|t| t.timestamp()),
            created_at: account.created_at.timestamp(),
            updated_at: account.updated_at.timestamp(),
        }
    }
}
