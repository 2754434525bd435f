//! Raw table rows and their conversion into domain models.

use crate::{DbError, Result as DbErrorResult};

use cr_core::{Identity, LinkedAccount, PlatformType, Username};

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub(crate) struct IdentityRow {
    pub id: String,
    pub golden_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub provider_image: Option<String>,
    pub username: Option<String>,
    pub avatar_override: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(sqlx::FromRow)]
pub(crate) struct LinkedAccountRow {
    pub id: String,
    pub identity_id: String,
    pub provider: String,
    pub external_account_id: String,
    pub platform_type: Option<String>,
    pub encrypted_refresh_token: Option<String>,
    pub access_token: Option<String>,
    pub expires_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = DbError;

    fn try_from(r: IdentityRow) -> DbErrorResult<Self> {
        Ok(Identity {
            id: parse_uuid("identities", &r.id)?,
            golden_id: parse_uuid("identities", &r.golden_id)?,
            email: r.email,
            display_name: r.display_name,
            provider_image: r.provider_image,
            username: r.username.map(Username::from_stored),
            avatar_override: r.avatar_override,
            created_at: parse_timestamp("identities", r.created_at)?,
            updated_at: parse_timestamp("identities", r.updated_at)?,
        })
    }
}

impl TryFrom<LinkedAccountRow> for LinkedAccount {
    type Error = DbError;

    fn try_from(r: LinkedAccountRow) -> DbErrorResult<Self> {
        let platform_type = r
            .platform_type
            .as_deref()
            .map(|s| {
                s.parse::<PlatformType>()
                    .map_err(|e| DbError::corrupt("linked_accounts", e.to_string()))
            })
            .transpose()?;

        Ok(LinkedAccount {
            id: parse_uuid("linked_accounts", &r.id)?,
            identity_id: parse_uuid("linked_accounts", &r.identity_id)?,
            provider: r.provider,
            external_account_id: r.external_account_id,
            platform_type,
            encrypted_refresh_token: r.encrypted_refresh_token,
            access_token: r.access_token,
            expires_at: r
                .expires_at
                .map(|ts| parse_timestamp("linked_accounts", ts))
                .transpose()?,
            created_at: parse_timestamp("linked_accounts", r.created_at)?,
            updated_at: parse_timestamp("linked_accounts", r.updated_at)?,
        })
    }
}

#[track_caller]
fn parse_uuid(table: &'static str, value: &str) -> DbErrorResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| DbError::corrupt(table, format!("bad id '{value}': {e}")))
}

#[track_caller]
fn parse_timestamp(table: &'static str, secs: i64) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| DbError::corrupt(table, format!("timestamp out of range: {secs}")))
}
