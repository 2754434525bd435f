use cr_core::{ErrorCategory, PlatformType};

use metrics::counter;

/// Counters for the identity engine
#[derive(Clone)]
pub struct IdentityMetrics {
    prefix: &'static str,
}

impl IdentityMetrics {
    pub fn new() -> Self {
        Self {
            prefix: "cr_identity",
        }
    }

    pub fn identity_provisioned(&self) {
        counter!(format!("{}.identities.provisioned", self.prefix)).increment(1);
    }

    pub fn account_linked(&self, platform: Option<PlatformType>, with_credential: bool) {
        let platform = platform.map(|p| p.as_str()).unwrap_or("UNCLASSIFIED");
        counter!(format!("{}.links.recorded.{}", self.prefix, platform)).increment(1);
        if !with_credential {
            counter!(format!("{}.links.awaiting_reauthorization", self.prefix)).increment(1);
        }
    }

    pub fn profile_fetched(&self, platform: PlatformType) {
        counter!(format!("{}.profiles.fetched.{}", self.prefix, platform.as_str())).increment(1);
    }

    pub fn profile_failed(&self, category: ErrorCategory) {
        counter!(format!("{}.profiles.failed", self.prefix)).increment(1);
        counter!(format!("{}.profiles.failed.{}", self.prefix, category)).increment(1);
    }

    /// Stored ciphertext could not be opened (tamper or key mismatch)
    pub fn credential_rejected(&self, category: ErrorCategory) {
        counter!(format!("{}.credentials.rejected.{}", self.prefix, category)).increment(1);
    }

    pub fn credential_rotated(&self) {
        counter!(format!("{}.credentials.rotated", self.prefix)).increment(1);
    }

    pub fn enrichment_degraded(&self) {
        counter!(format!("{}.session.enrichment_degraded", self.prefix)).increment(1);
    }

    pub fn identity_deleted(&self) {
        counter!(format!("{}.identities.deleted", self.prefix)).increment(1);
    }

    pub fn username_conflict(&self) {
        counter!(format!("{}.usernames.conflict", self.prefix)).increment(1);
    }
}

impl Default for IdentityMetrics {
    fn default() -> Self {
        Self::new()
    }
}
