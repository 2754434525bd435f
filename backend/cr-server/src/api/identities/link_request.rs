use cr_core::LinkingPayload;

use chrono::DateTime;
use serde::Deserialize;
use zeroize::Zeroizing;

/// Body of a link event posted by the OAuth orchestrator.
///
/// No `Debug`: the refresh token must not reach a log line.
#[derive(Deserialize)]
pub struct LinkRequest {
    pub provider: String,
    pub external_account_id: String,
    #[serde(default)]
    pub refresh_token: Option<Zeroizing<String>>,
    #[serde(default)]
    pub access_token: Option<String>,
    /// Unix seconds
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl From<LinkRequest> for LinkingPayload {
    fn from(request: LinkRequest) -> Self {
        LinkingPayload {
            provider: request.provider,
            external_account_id: request.external_account_id,
            refresh_credential: request.refresh_token,
            access_credential: request.access_token,
            expiry: request
                .expires_at
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        }
    }
}
