use chrono::{DateTime, Utc};
use serde::Deserialize;
use zeroize::Zeroizing;

/// Completed OAuth handshake handed over by the linking orchestrator.
///
/// The raw refresh credential is wrapped in [`Zeroizing`] so its buffer is
/// wiped as soon as the payload is consumed.
#[derive(Deserialize)]
pub struct LinkingPayload {
    pub provider: String,
    pub external_account_id: String,
    #[serde(default)]
    pub refresh_credential: Option<Zeroizing<String>>,
    #[serde(default)]
    pub access_credential: Option<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for LinkingPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkingPayload")
            .field("provider", &self.provider)
            .field("external_account_id", &self.external_account_id)
            .field(
                "refresh_credential",
                &self.refresh_credential.as_ref().map(|_| "<redacted>"),
            )
            .field(
                "access_credential",
                &self.access_credential.as_ref().map(|_| "<redacted>"),
            )
            .field("expiry", &self.expiry)
            .finish()
    }
}
