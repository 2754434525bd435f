use crate::{ConfigError, ConfigErrorResult, ENCRYPTION_KEY_HEX_LENGTH};

use serde::Deserialize;

/// Process-wide key protecting refresh credentials at rest
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct EncryptionConfig {
    /// 256-bit key as 64 hex characters (`openssl rand -hex 32`)
    pub key: Option<String>,
}

impl EncryptionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let key = self.key.as_deref().ok_or_else(|| {
            ConfigError::encryption(
                "encryption.key is not set. Generate one with: openssl rand -hex 32",
            )
        })?;

        if key.len() != ENCRYPTION_KEY_HEX_LENGTH {
            return Err(ConfigError::encryption(format!(
                "encryption.key must be {} hex characters (32 bytes), got {}",
                ENCRYPTION_KEY_HEX_LENGTH,
                key.len()
            )));
        }

        if hex::decode(key).is_err() {
            return Err(ConfigError::encryption(
                "encryption.key must contain only hex characters",
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for EncryptionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionConfig")
            .field("key", &self.key.as_ref().map(|_| "<set>"))
            .finish()
    }
}
