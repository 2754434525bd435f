use serde::{Deserialize, Serialize};

/// Identity attributes merged into a session at materialization time.
///
/// Never persisted; rebuilt from the identity store on every resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedClaims {
    /// Session subject (identity id)
    pub sub: String,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Golden record id, empty when the identity could not be loaded
    pub golden_id: String,
    pub username: Option<String>,
    pub avatar_override: Option<String>,
    /// Avatar to render: override when set, else the provider avatar
    pub image: Option<String>,
}
