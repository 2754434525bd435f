//! Profile lookups backed by a stored refresh credential.
//!
//! Each step short-circuits into a categorized [`ProfileResult`] failure;
//! nothing here returns `Err` to the caller. Decrypt failures are surfaced as
//! they are and never retried: they mean tamper or a key mismatch, and only a
//! new authorization can fix them.

use crate::{
    AccessGrant, IdentityMetrics, PlatformApiError, PlatformDataApi, TokenExchange,
};

use cr_auth::{CipherError, CredentialCipher};
use cr_core::{
    ErrorCategory, LinkedAccount, PlatformProfile, PlatformType, ProfileFailure, ProfileResult,
    normalize_count,
};
use cr_db::{IdentityRepository, LinkedAccountRepository};

use std::sync::Arc;

use chrono::Utc;
use log::{debug, error, warn};
use sqlx::SqlitePool;
use uuid::Uuid;

const NOT_AUTHENTICATED: &str = "Not authenticated - please sign in";
const MISSING_CREDENTIAL: &str = "No refresh token stored - reauthorize required";
const KEY_MISMATCH: &str = "Security Error: Key Mismatch";
const INTERNAL: &str = "Profile lookup failed";

pub struct CredentialRefreshClient {
    pool: SqlitePool,
    cipher: Arc<CredentialCipher>,
    token_exchange: Arc<dyn TokenExchange>,
    data_api: Arc<dyn PlatformDataApi>,
    metrics: IdentityMetrics,
}

impl CredentialRefreshClient {
    pub fn new(
        pool: SqlitePool,
        cipher: Arc<CredentialCipher>,
        token_exchange: Arc<dyn TokenExchange>,
        data_api: Arc<dyn PlatformDataApi>,
    ) -> Self {
        Self {
            pool,
            cipher,
            token_exchange,
            data_api,
            metrics: IdentityMetrics::new(),
        }
    }

    /// Verified profile for `platform` on behalf of the calling identity.
    ///
    /// `caller` is the request-scoped identity id, `None` when unauthenticated.
    pub async fn get_platform_profile(
        &self,
        caller: Option<Uuid>,
        platform: PlatformType,
    ) -> ProfileResult {
        let result = self.fetch_profile(caller, platform).await;

        match &result {
            Ok(_) => self.metrics.profile_fetched(platform),
            Err(failure) => {
                self.metrics.profile_failed(failure.error_category);
                debug!(
                    "Profile lookup for {:?} on {} failed: {}",
                    caller, platform, failure.error_category
                );
            }
        }

        result.into()
    }

    async fn fetch_profile(
        &self,
        caller: Option<Uuid>,
        platform: PlatformType,
    ) -> Result<PlatformProfile, ProfileFailure> {
        let identity_id =
            caller.ok_or_else(|| failure(ErrorCategory::NotAuthenticated, NOT_AUTHENTICATED))?;

        // A session may outlive its identity (sovereignty deletion)
        let identity = IdentityRepository::find_by_id(&self.pool, identity_id)
            .await
            .map_err(|e| internal_failure("identity lookup", &e))?;
        if identity.is_none() {
            return Err(failure(ErrorCategory::NotAuthenticated, NOT_AUTHENTICATED));
        }

        let account =
            LinkedAccountRepository::find_by_identity_and_platform(&self.pool, identity_id, platform)
                .await
                .map_err(|e| internal_failure("linked account lookup", &e))?
                .ok_or_else(|| {
                    failure(
                        ErrorCategory::NotLinked,
                        format!("No {} account linked", platform.display_name()),
                    )
                })?;

        let ciphertext = account
            .encrypted_refresh_token
            .as_deref()
            .ok_or_else(|| failure(ErrorCategory::MissingCredential, MISSING_CREDENTIAL))?;

        let refresh_token = self.cipher.decrypt(ciphertext).map_err(|e| {
            self.metrics.credential_rejected(e.category());
            warn!(
                "Stored credential for account {} could not be decrypted: {}",
                account.id, e
            );
            cipher_failure(&e)
        })?;

        let grant = self
            .token_exchange
            .exchange(platform, &refresh_token)
            .await
            .map_err(|e| platform_failure(&account, &e))?;
        drop(refresh_token);

        self.store_grant(&account, &grant).await;

        let channel = self
            .data_api
            .fetch_channel(platform, &grant.access_token)
            .await
            .map_err(|e| platform_failure(&account, &e))?;

        Ok(PlatformProfile {
            platform_id: channel.id,
            display_name: channel.title,
            normalized_count: normalize_count(&channel.subscriber_count),
        })
    }

    /// Persist the fresh access token and any rotated refresh token.
    ///
    /// Failure here is logged, not returned: the profile can still be served.
    async fn store_grant(&self, account: &LinkedAccount, grant: &AccessGrant) {
        let now = Utc::now();

        let rotated = match grant.refresh_token.as_ref() {
            Some(refresh) => match self.cipher.encrypt(refresh) {
                Ok(ciphertext) => Some(ciphertext),
                Err(e) => {
                    error!("Failed to encrypt rotated credential for {}: {}", account.id, e);
                    None
                }
            },
            None => None,
        };

        let result = LinkedAccountRepository::rotate_refresh_token(
            &self.pool,
            account.id,
            rotated.as_deref(),
            &grant.access_token,
            grant.expires_at(now),
            now,
        )
        .await;

        match result {
            Ok(true) if rotated.is_some() => {
                self.metrics.credential_rotated();
                debug!("Rotated refresh credential for account {}", account.id);
            }
            Ok(_) => {}
            Err(e) => warn!(
                "Failed to persist refreshed credentials for account {}: {}",
                account.id, e
            ),
        }
    }
}

fn failure(error_category: ErrorCategory, message: impl Into<String>) -> ProfileFailure {
    ProfileFailure {
        error_category,
        message: message.into(),
    }
}

fn internal_failure(step: &str, err: &dyn std::fmt::Display) -> ProfileFailure {
    error!("Profile lookup failed during {}: {}", step, err);
    failure(ErrorCategory::Internal, INTERNAL)
}

fn cipher_failure(err: &CipherError) -> ProfileFailure {
    match err.category() {
        category @ (ErrorCategory::Integrity | ErrorCategory::Format) => {
            failure(category, KEY_MISMATCH)
        }
        category => failure(category, INTERNAL),
    }
}

fn platform_failure(account: &LinkedAccount, err: &PlatformApiError) -> ProfileFailure {
    warn!("Platform call for account {} failed: {}", account.id, err);
    failure(err.category(), err.user_message())
}
