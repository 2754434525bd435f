use crate::Result as DbErrorResult;

use uuid::Uuid;

/// Sessions are written by the sign-in framework; the engine only removes
/// them when an identity is erased.
pub struct SessionRepository;

impl SessionRepository {
    pub async fn delete_for_identity<'e, E>(executor: E, identity_id: Uuid) -> DbErrorResult<u64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query("DELETE FROM sessions WHERE identity_id = ?")
            .bind(identity_id.to_string())
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
