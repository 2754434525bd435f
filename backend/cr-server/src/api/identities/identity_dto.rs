use cr_core::Identity;

use serde::Serialize;

/// Identity as returned to the sign-in framework
#[derive(Debug, Clone, Serialize)]
pub struct IdentityDto {
    pub id: String,
    pub golden_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Identity> for IdentityDto {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            golden_id: identity.golden_id.to_string(),
            image: identity.effective_avatar().map(str::to_string),
            email: identity.email,
            display_name: identity.display_name,
            username: identity.username.map(|u| u.into_inner()),
            created_at: identity.created_at.timestamp(),
            updated_at: identity.updated_at.timestamp(),
        }
    }
}
