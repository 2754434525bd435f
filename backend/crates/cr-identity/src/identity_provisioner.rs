use crate::{IdentityMetrics, Result as IdentityResult};

use cr_core::{Identity, NewIdentity};
use cr_db::IdentityRepository;

use log::info;
use sqlx::SqlitePool;

/// Creates the durable identity on first successful sign-in
pub struct IdentityProvisioner {
    pool: SqlitePool,
    metrics: IdentityMetrics,
}

impl IdentityProvisioner {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            metrics: IdentityMetrics::new(),
        }
    }

    /// Return the identity for this email, creating it (and its golden record
    /// id) when none exists. An existing identity is returned unchanged.
    pub async fn provision(&self, profile: NewIdentity) -> IdentityResult<Identity> {
        let profile = NewIdentity {
            email: profile
                .email
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty()),
            ..profile
        };

        if let Some(email) = profile.email.as_deref()
            && let Some(existing) = IdentityRepository::find_by_email(&self.pool, email).await?
        {
            return Ok(existing);
        }

        let identity = Identity::new(profile);

        match IdentityRepository::create(&self.pool, &identity).await {
            Ok(()) => {}
            // A concurrent sign-in with the same email won the insert
            Err(e) if e.is_unique_violation() => {
                if let Some(email) = identity.email.as_deref()
                    && let Some(winner) =
                        IdentityRepository::find_by_email(&self.pool, email).await?
                {
                    return Ok(winner);
                }
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        }

        self.metrics.identity_provisioned();
        info!(
            "Provisioned identity {} (golden id {})",
            identity.id, identity.golden_id
        );

        Ok(identity)
    }
}
