//! Identity persistence.
//!
//! Deletion is hard and cascading: there is no soft-delete column and no
//! retention window. `hard_delete_cascade` must run inside a transaction so a
//! concurrent reader never observes an identity without its children or the
//! reverse.

use crate::repositories::rows::IdentityRow;
use crate::{LinkedAccountRepository, Result as DbErrorResult, SessionRepository};

use cr_core::{Identity, Username};

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use uuid::Uuid;

const SELECT_IDENTITY: &str = r#"
    SELECT id, golden_id, email, display_name, provider_image,
           username, avatar_override, created_at, updated_at
    FROM identities
"#;

/// Rows removed by a cascading identity delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletionCounts {
    pub identities: u64,
    pub linked_accounts: u64,
    pub sessions: u64,
}

impl DeletionCounts {
    pub fn identity_existed(&self) -> bool {
        self.identities > 0
    }
}

pub struct IdentityRepository;

impl IdentityRepository {
    pub async fn create<'e, E>(executor: E, identity: &Identity) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
              INSERT INTO identities (
                  id, golden_id, email, display_name, provider_image,
                  username, avatar_override, created_at, updated_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(identity.id.to_string())
        .bind(identity.golden_id.to_string())
        .bind(&identity.email)
        .bind(&identity.display_name)
        .bind(&identity.provider_image)
        .bind(identity.username.as_ref().map(Username::as_str))
        .bind(&identity.avatar_override)
        .bind(identity.created_at.timestamp())
        .bind(identity.updated_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<Identity>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, IdentityRow>(&format!("{SELECT_IDENTITY} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(executor)
            .await?;

        row.map(Identity::try_from).transpose()
    }

    /// Identity registered with this email, if any
    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> DbErrorResult<Option<Identity>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, IdentityRow>(&format!(
            "{SELECT_IDENTITY} WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(executor)
        .await?;

        row.map(Identity::try_from).transpose()
    }

    /// Whether a different identity already holds `username`
    pub async fn username_taken_by_other<'e, E>(
        executor: E,
        username: &Username,
        exclude_id: Uuid,
    ) -> DbErrorResult<bool>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let taken: bool = sqlx::query_scalar(
            r#"
              SELECT EXISTS(
                  SELECT 1 FROM identities WHERE username = ? AND id != ?
              )
              "#,
        )
        .bind(username.as_str())
        .bind(exclude_id.to_string())
        .fetch_one(executor)
        .await?;

        Ok(taken)
    }

    /// Set or clear the handle. A unique violation surfaces as
    /// [`crate::DbError::UniqueViolation`]. Returns false when the identity is gone.
    pub async fn set_username<'e, E>(
        executor: E,
        id: Uuid,
        username: Option<&Username>,
        updated_at: DateTime<Utc>,
    ) -> DbErrorResult<bool>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result =
            sqlx::query("UPDATE identities SET username = ?, updated_at = ? WHERE id = ?")
                .bind(username.map(Username::as_str))
                .bind(updated_at.timestamp())
                .bind(id.to_string())
                .execute(executor)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_avatar_override<'e, E>(
        executor: E,
        id: Uuid,
        avatar_override: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> DbErrorResult<bool>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result =
            sqlx::query("UPDATE identities SET avatar_override = ?, updated_at = ? WHERE id = ?")
                .bind(avatar_override)
                .bind(updated_at.timestamp())
                .bind(id.to_string())
                .execute(executor)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove an identity together with every linked account and session it owns.
    ///
    /// Children are deleted explicitly rather than relying on `ON DELETE
    /// CASCADE`, so the counts reflect what was actually removed. Pass a
    /// transaction (`&mut *tx`); the caller commits.
    pub async fn hard_delete_cascade(
        conn: &mut SqliteConnection,
        id: Uuid,
    ) -> DbErrorResult<DeletionCounts> {
        let sessions = SessionRepository::delete_for_identity(&mut *conn, id).await?;
        let linked_accounts = LinkedAccountRepository::delete_for_identity(&mut *conn, id).await?;

        let result = sqlx::query("DELETE FROM identities WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *conn)
            .await?;

        Ok(DeletionCounts {
            identities: result.rows_affected(),
            linked_accounts,
            sessions,
        })
    }
}
