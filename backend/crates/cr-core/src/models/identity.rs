//! Identity entity - the durable record behind a creator account.

use crate::Username;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A creator identity.
///
/// `golden_id` is assigned once when the identity is created and is never
/// regenerated; it is the portable key other systems use for this creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub golden_id: Uuid,
    pub email: Option<String>,
    pub display_name: Option<String>,
    /// Avatar supplied by the sign-in provider
    pub provider_image: Option<String>,
    /// Case-folded public handle, unique across identities
    pub username: Option<Username>,
    /// User-chosen avatar that takes precedence over `provider_image`
    pub avatar_override: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Create a new identity from a first sign-in, minting its golden record id
    pub fn new(profile: NewIdentity) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            golden_id: Uuid::new_v4(),
            email: profile.email,
            display_name: profile.display_name,
            provider_image: profile.image,
            username: None,
            avatar_override: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Avatar to show: the override when set, otherwise the provider image
    pub fn effective_avatar(&self) -> Option<&str> {
        self.avatar_override
            .as_deref()
            .or(self.provider_image.as_deref())
    }
}

/// Profile data available at first sign-in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIdentity {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub image: Option<String>,
}
