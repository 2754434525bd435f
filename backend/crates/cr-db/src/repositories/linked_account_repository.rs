use crate::repositories::rows::LinkedAccountRow;
use crate::Result as DbErrorResult;

use cr_core::{LinkedAccount, PlatformType};

use chrono::{DateTime, Utc};
use uuid::Uuid;

const SELECT_LINKED_ACCOUNT: &str = r#"
    SELECT id, identity_id, provider, external_account_id, platform_type,
           encrypted_refresh_token, access_token, expires_at, created_at, updated_at
    FROM linked_accounts
"#;

pub struct LinkedAccountRepository;

impl LinkedAccountRepository {
    pub async fn find_by_identity_and_platform<'e, E>(
        executor: E,
        identity_id: Uuid,
        platform: PlatformType,
    ) -> DbErrorResult<Option<LinkedAccount>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, LinkedAccountRow>(&format!(
            "{SELECT_LINKED_ACCOUNT} WHERE identity_id = ? AND platform_type = ?"
        ))
        .bind(identity_id.to_string())
        .bind(platform.as_str())
        .fetch_optional(executor)
        .await?;

        row.map(LinkedAccount::try_from).transpose()
    }

    pub async fn find_by_identity_and_provider<'e, E>(
        executor: E,
        identity_id: Uuid,
        provider: &str,
    ) -> DbErrorResult<Option<LinkedAccount>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, LinkedAccountRow>(&format!(
            "{SELECT_LINKED_ACCOUNT} WHERE identity_id = ? AND provider = ?"
        ))
        .bind(identity_id.to_string())
        .bind(provider)
        .fetch_optional(executor)
        .await?;

        row.map(LinkedAccount::try_from).transpose()
    }

    /// Insert the account, or overwrite the row with the same id.
    ///
    /// `created_at` is preserved on update.
    pub async fn upsert<'e, E>(executor: E, account: &LinkedAccount) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
              INSERT INTO linked_accounts (
                  id, identity_id, provider, external_account_id, platform_type,
                  encrypted_refresh_token, access_token, expires_at, created_at, updated_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              ON CONFLICT(id) DO UPDATE SET
                  provider = excluded.provider,
                  external_account_id = excluded.external_account_id,
                  platform_type = excluded.platform_type,
                  encrypted_refresh_token = excluded.encrypted_refresh_token,
                  access_token = excluded.access_token,
                  expires_at = excluded.expires_at,
                  updated_at = excluded.updated_at
              "#,
        )
        .bind(account.id.to_string())
        .bind(account.identity_id.to_string())
        .bind(&account.provider)
        .bind(&account.external_account_id)
        .bind(account.platform_type.map(|p| p.as_str()))
        .bind(&account.encrypted_refresh_token)
        .bind(&account.access_token)
        .bind(account.expires_at.map(|dt| dt.timestamp()))
        .bind(account.created_at.timestamp())
        .bind(account.updated_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Store credentials returned by a token exchange.
    ///
    /// `encrypted_refresh_token` replaces the stored ciphertext only when
    /// `Some`; the provider may omit a rotated refresh token.
    pub async fn rotate_refresh_token<'e, E>(
        executor: E,
        id: Uuid,
        encrypted_refresh_token: Option<&str>,
        access_token: &str,
        expires_at: Option<DateTime<Utc>>,
        updated_at: DateTime<Utc>,
    ) -> DbErrorResult<bool>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query(
            r#"
              UPDATE linked_accounts
              SET encrypted_refresh_token = COALESCE(?, encrypted_refresh_token),
                  access_token = ?,
                  expires_at = ?,
                  updated_at = ?
              WHERE id = ?
              "#,
        )
        .bind(encrypted_refresh_token)
        .bind(access_token)
        .bind(expires_at.map(|dt| dt.timestamp()))
        .bind(updated_at.timestamp())
        .bind(id.to_string())
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_for_identity<'e, E>(executor: E, identity_id: Uuid) -> DbErrorResult<u64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query("DELETE FROM linked_accounts WHERE identity_id = ?")
            .bind(identity_id.to_string())
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
