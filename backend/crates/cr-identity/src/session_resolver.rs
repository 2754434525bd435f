//! Enriches session claims with durable identity attributes.
//!
//! Session issuance must never be blocked by enrichment. When the store
//! cannot be read the claims degrade to safe defaults (empty golden id, no
//! username), the failure is logged, and a counter is bumped so an outage
//! does not pass for "no identity data".

use crate::IdentityMetrics;

use cr_auth::Claims;
use cr_core::{EnrichedClaims, Identity};
use cr_db::IdentityRepository;

use log::{debug, warn};
use sqlx::SqlitePool;

pub struct SessionResolver {
    pool: SqlitePool,
    metrics: IdentityMetrics,
}

impl SessionResolver {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            metrics: IdentityMetrics::new(),
        }
    }

    pub async fn resolve(&self, claims: Claims) -> EnrichedClaims {
        let base = EnrichedClaims {
            sub: claims.sub.clone(),
            name: claims.name.clone(),
            email: claims.email.clone(),
            image: claims.picture.clone(),
            ..EnrichedClaims::default()
        };

        let Some(identity_id) = claims.identity_id() else {
            debug!("Session subject {} is not an identity id", claims.sub);
            return base;
        };

        match IdentityRepository::find_by_id(&self.pool, identity_id).await {
            Ok(Some(identity)) => enrich(base, &identity),
            Ok(None) => {
                debug!("No identity {} for session subject", identity_id);
                base
            }
            Err(e) => {
                self.metrics.enrichment_degraded();
                warn!(
                    "Identity lookup for session {} failed, using defaults: {}",
                    identity_id, e
                );
                base
            }
        }
    }
}

fn enrich(base: EnrichedClaims, identity: &Identity) -> EnrichedClaims {
    let image = identity
        .avatar_override
        .clone()
        .or(base.image)
        .or_else(|| identity.provider_image.clone());

    EnrichedClaims {
        golden_id: identity.golden_id.to_string(),
        username: identity.username.as_ref().map(|u| u.as_str().to_string()),
        avatar_override: identity.avatar_override.clone(),
        image,
        ..base
    }
}
