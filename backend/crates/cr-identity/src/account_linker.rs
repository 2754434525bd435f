//! Turns a completed OAuth handshake into a stored, encrypted credential record.
//!
//! The raw refresh credential arrives inside a [`LinkingPayload`] wrapped in
//! `Zeroizing`; [`apply_link_event`] consumes the payload, so the plaintext
//! buffer is wiped before the record ever reaches the store. No code path
//! writes a plaintext refresh credential.

use crate::{IdentityError, IdentityMetrics, Result as IdentityResult};

use cr_auth::{CipherResult, CredentialCipher};
use cr_core::{LinkedAccount, LinkingPayload, PlatformType};
use cr_db::{IdentityRepository, LinkedAccountRepository};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

/// Merge a linking event into the existing record for the same platform.
///
/// Relinking keeps the record id and `created_at` and rotates the stored
/// ciphertext. A payload without a refresh credential leaves any existing
/// ciphertext untouched; a new record created that way awaits reauthorization.
pub fn apply_link_event(
    existing: Option<LinkedAccount>,
    identity_id: Uuid,
    payload: LinkingPayload,
    cipher: &CredentialCipher,
    now: DateTime<Utc>,
) -> CipherResult<LinkedAccount> {
    let LinkingPayload {
        provider,
        external_account_id,
        refresh_credential,
        access_credential,
        expiry,
    } = payload;

    let encrypted = refresh_credential
        .map(|refresh| cipher.encrypt(&refresh))
        .transpose()?;

    let platform_type = PlatformType::from_provider(&provider);
    let provider = provider.trim().to_ascii_lowercase();

    let account = match existing {
        Some(previous) => LinkedAccount {
            provider,
            external_account_id,
            platform_type,
            encrypted_refresh_token: encrypted.or(previous.encrypted_refresh_token),
            access_token: access_credential.or(previous.access_token),
            expires_at: expiry.or(previous.expires_at),
            updated_at: now,
            ..previous
        },
        None => LinkedAccount {
            id: Uuid::new_v4(),
            identity_id,
            provider,
            external_account_id,
            platform_type,
            encrypted_refresh_token: encrypted,
            access_token: access_credential,
            expires_at: expiry,
            created_at: now,
            updated_at: now,
        },
    };

    Ok(account)
}

/// Extension point the linking orchestrator calls after each handshake
pub struct AccountLinker {
    pool: SqlitePool,
    cipher: Arc<CredentialCipher>,
    metrics: IdentityMetrics,
}

impl AccountLinker {
    pub fn new(pool: SqlitePool, cipher: Arc<CredentialCipher>) -> Self {
        Self {
            pool,
            cipher,
            metrics: IdentityMetrics::new(),
        }
    }

    /// Record a link event for `identity_id`, creating or rotating its record.
    pub async fn on_link(
        &self,
        identity_id: Uuid,
        payload: LinkingPayload,
    ) -> IdentityResult<LinkedAccount> {
        if payload.provider.trim().is_empty() {
            return Err(IdentityError::validation(
                "provider is required",
                Some("provider"),
            ));
        }
        if payload.external_account_id.trim().is_empty() {
            return Err(IdentityError::validation(
                "external_account_id is required",
                Some("external_account_id"),
            ));
        }

        debug!("Link event for identity {} via {}", identity_id, payload.provider);

        let mut tx = cr_db::begin_immediate(&self.pool).await?;

        if IdentityRepository::find_by_id(&mut *tx, identity_id)
            .await?
            .is_none()
        {
            return Err(IdentityError::not_found("Identity not found"));
        }

        let existing = find_existing(&mut tx, identity_id, &payload.provider).await?;
        let relinked = existing.is_some();

        let account = apply_link_event(existing, identity_id, payload, &self.cipher, Utc::now())?;

        LinkedAccountRepository::upsert(&mut *tx, &account).await?;
        tx.commit().await?;

        let with_credential = !account.awaiting_reauthorization();
        self.metrics
            .account_linked(account.platform_type, with_credential);

        info!(
            "{} account {} for identity {} (platform={}, credential={})",
            if relinked { "Relinked" } else { "Linked" },
            account.id,
            identity_id,
            account.platform_type.map(|p| p.as_str()).unwrap_or("unclassified"),
            if with_credential { "stored" } else { "awaiting reauthorization" },
        );

        Ok(account)
    }
}

/// Classified providers are keyed by platform, so `google` and `youtube`
/// share one record; unclassified ones by raw provider name.
async fn find_existing(
    conn: &mut SqliteConnection,
    identity_id: Uuid,
    provider: &str,
) -> IdentityResult<Option<LinkedAccount>> {
    let existing = match PlatformType::from_provider(provider) {
        Some(platform) => {
            LinkedAccountRepository::find_by_identity_and_platform(conn, identity_id, platform)
                .await?
        }
        None => {
            let normalized = provider.trim().to_ascii_lowercase();
            LinkedAccountRepository::find_by_identity_and_provider(conn, identity_id, &normalized)
                .await?
        }
    };

    Ok(existing)
}
