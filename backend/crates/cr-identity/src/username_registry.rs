//! Public handles.
//!
//! The availability check is advisory. The unique index on
//! `identities.username` is the only authority, so a race between check and
//! write surfaces as [`IdentityError::Conflict`] from [`UsernameRegistry::claim`].

use crate::{IdentityError, IdentityMetrics, Result as IdentityResult};

use cr_core::{CoreResult, Username};
use cr_db::IdentityRepository;

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use log::info;
use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

const USERNAME_TAKEN: &str = "This username is already taken.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityResult {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AvailabilityResult {
    fn available() -> Self {
        Self {
            available: true,
            error: None,
        }
    }

    fn unavailable(error: impl Into<String>) -> Self {
        Self {
            available: false,
            error: Some(error.into()),
        }
    }
}

pub struct UsernameRegistry {
    pool: SqlitePool,
    metrics: IdentityMetrics,
}

impl UsernameRegistry {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            metrics: IdentityMetrics::new(),
        }
    }

    /// Check length, charset and reserved words, returning the case-folded handle
    pub fn validate(candidate: &str) -> CoreResult<Username> {
        Username::parse(candidate)
    }

    /// Whether `candidate` could be claimed by `caller`. The caller's own
    /// current handle counts as available.
    pub async fn check_availability(
        &self,
        caller: Option<Uuid>,
        candidate: &str,
    ) -> AvailabilityResult {
        let Some(caller) = caller else {
            return AvailabilityResult::unavailable("Not authenticated");
        };

        let username = match Self::validate(candidate) {
            Ok(username) => username,
            Err(e) => return AvailabilityResult::unavailable(e.user_message()),
        };

        match IdentityRepository::username_taken_by_other(&self.pool, &username, caller).await {
            Ok(false) => AvailabilityResult::available(),
            Ok(true) => AvailabilityResult::unavailable(USERNAME_TAKEN),
            Err(e) => {
                log::error!("Username availability check failed: {}", e);
                AvailabilityResult::unavailable("Could not check availability")
            }
        }
    }

    /// Set `identity_id`'s handle, or clear it with `None`.
    pub async fn claim(
        &self,
        identity_id: Uuid,
        username: Option<&Username>,
    ) -> IdentityResult<()> {
        let mut tx = cr_db::begin_immediate(&self.pool).await?;
        self.claim_in(&mut tx, identity_id, username).await?;
        tx.commit().await?;

        info!(
            "Identity {} username set to {}",
            identity_id,
            username.map(Username::as_str).unwrap_or("<none>")
        );

        Ok(())
    }

    /// [`Self::claim`] inside a transaction owned by the caller.
    pub(crate) async fn claim_in(
        &self,
        conn: &mut SqliteConnection,
        identity_id: Uuid,
        username: Option<&Username>,
    ) -> IdentityResult<()> {
        if let Some(username) = username
            && IdentityRepository::username_taken_by_other(&mut *conn, username, identity_id)
                .await?
        {
            self.metrics.username_conflict();
            return Err(conflict());
        }

        let updated =
            match IdentityRepository::set_username(&mut *conn, identity_id, username, Utc::now())
                .await
            {
                Ok(updated) => updated,
                // Lost the race after the pre-check
                Err(e) if e.is_unique_violation() => {
                    self.metrics.username_conflict();
                    return Err(conflict());
                }
                Err(e) => return Err(e.into()),
            };

        if !updated {
            return Err(IdentityError::not_found("Identity not found"));
        }

        Ok(())
    }
}

#[track_caller]
fn conflict() -> IdentityError {
    IdentityError::Conflict {
        message: USERNAME_TAKEN.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
