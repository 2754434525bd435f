use cr_core::{Identity, LinkedAccount, NewIdentity, PlatformType};

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Creates a test Identity with sensible defaults
pub fn create_test_identity() -> Identity {
    Identity::new(NewIdentity {
        email: Some(format!("creator-{}@example.com", Uuid::new_v4())),
        display_name: Some("Test Creator".to_string()),
        image: Some("https://example.com/avatar.png".to_string()),
    })
}

/// Creates a YouTube LinkedAccount holding a placeholder ciphertext
pub fn create_test_linked_account(identity_id: Uuid) -> LinkedAccount {
    let now = Utc::now();
    LinkedAccount {
        id: Uuid::new_v4(),
        identity_id,
        provider: "google".to_string(),
        external_account_id: format!("UC{}", Uuid::new_v4().simple()),
        platform_type: Some(PlatformType::Youtube),
        encrypted_refresh_token: Some("aXY=:dGFn:Y3Q=".to_string()),
        access_token: Some("ya29.test".to_string()),
        expires_at: Some(now + Duration::hours(1)),
        created_at: now,
        updated_at: now,
    }
}

/// Inserts a session expiring in a day, the way the sign-in framework does
pub async fn insert_test_session(pool: &SqlitePool, identity_id: Uuid) -> String {
    let token = format!("session-{}", Uuid::new_v4());
    let now = Utc::now();

    sqlx::query(
        "INSERT INTO sessions (id, session_token, identity_id, expires_at, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&token)
    .bind(identity_id.to_string())
    .bind((now + Duration::days(1)).timestamp())
    .bind(now.timestamp())
    .execute(pool)
    .await
    .expect("Failed to insert session");

    token
}
