use crate::{IdentityError, Result as IdentityResult, UsernameRegistry};

use cr_core::{ErrorCategory, Username};
use cr_db::IdentityRepository;

use chrono::Utc;
use log::{error, info};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Requested profile changes. An empty string clears the field; an absent
/// field is left as it is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProfileUpdateResult {
    Success {
        username: Option<String>,
        image: Option<String>,
    },
    Failure {
        error_category: ErrorCategory,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<String>,
    },
}

impl ProfileUpdateResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn error_category(&self) -> Option<ErrorCategory> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error_category, .. } => Some(*error_category),
        }
    }
}

impl From<IdentityError> for ProfileUpdateResult {
    fn from(err: IdentityError) -> Self {
        if err.category() == ErrorCategory::Internal {
            error!("Profile update failed: {}", err);
        }
        Self::Failure {
            error_category: err.category(),
            message: err.user_message(),
            field: err.field().map(str::to_string),
        }
    }
}

/// Self-service edits of handle and avatar override
pub struct ProfileEditor {
    pool: SqlitePool,
    usernames: UsernameRegistry,
}

impl ProfileEditor {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            usernames: UsernameRegistry::new(pool.clone()),
            pool,
        }
    }

    pub async fn update_profile(
        &self,
        caller: Option<Uuid>,
        update: ProfileUpdate,
    ) -> ProfileUpdateResult {
        let Some(identity_id) = caller else {
            return IdentityError::not_authenticated().into();
        };

        match self.apply(identity_id, update).await {
            Ok(result) => result,
            Err(e) => e.into(),
        }
    }

    async fn apply(
        &self,
        identity_id: Uuid,
        update: ProfileUpdate,
    ) -> IdentityResult<ProfileUpdateResult> {
        // Validate everything before writing anything
        let username = match update.username.as_deref().map(str::trim) {
            None => None,
            Some("") => Some(None),
            Some(candidate) => Some(Some(UsernameRegistry::validate(candidate)?)),
        };

        let image = match update.image_url.as_deref().map(str::trim) {
            None => None,
            Some("") => Some(None),
            Some(url) if url.starts_with("http") => Some(Some(url.to_string())),
            Some(_) => {
                return Err(IdentityError::validation(
                    "Image URL must start with http.",
                    Some("image_url"),
                ));
            }
        };

        // Dropping `tx` on any error rolls back both writes
        let mut tx = cr_db::begin_immediate(&self.pool).await?;

        if let Some(username) = &username {
            self.usernames
                .claim_in(&mut tx, identity_id, username.as_ref())
                .await?;
        }

        if let Some(image) = &image {
            let updated = IdentityRepository::set_avatar_override(
                &mut *tx,
                identity_id,
                image.as_deref(),
                Utc::now(),
            )
            .await?;
            if !updated {
                return Err(IdentityError::not_found("Identity not found"));
            }
        }

        let identity = IdentityRepository::find_by_id(&mut *tx, identity_id)
            .await?
            .ok_or_else(|| IdentityError::not_found("Identity not found"))?;

        tx.commit().await?;

        info!("Profile updated for identity {}", identity_id);

        let image = identity.effective_avatar().map(str::to_string);
        Ok(ProfileUpdateResult::Success {
            username: identity.username.map(Username::into_inner),
            image,
        })
    }
}
