use cr_auth::CredentialCipher;
use cr_core::{Identity, LinkedAccount, NewIdentity, PlatformType};
use cr_db::{IdentityRepository, LinkedAccountRepository};

use std::sync::Arc;

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

pub const TEST_KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

pub fn test_cipher() -> Arc<CredentialCipher> {
    Arc::new(CredentialCipher::from_hex(TEST_KEY_HEX).expect("valid test key"))
}

pub fn new_identity_profile() -> NewIdentity {
    NewIdentity {
        email: Some(format!("creator-{}@example.com", Uuid::new_v4())),
        display_name: Some("Test Creator".to_string()),
        image: Some("https://example.com/provider.png".to_string()),
    }
}

/// Inserts an identity and returns it
pub async fn insert_identity(pool: &SqlitePool) -> Identity {
    let identity = Identity::new(new_identity_profile());
    IdentityRepository::create(pool, &identity)
        .await
        .expect("Failed to insert identity");
    identity
}

/// Inserts a YouTube account whose refresh token is encrypted with `cipher`
pub async fn insert_youtube_account(
    pool: &SqlitePool,
    cipher: &CredentialCipher,
    identity_id: Uuid,
    refresh_token: Option<&str>,
) -> LinkedAccount {
    let now = Utc::now();
    let account = LinkedAccount {
        id: Uuid::new_v4(),
        identity_id,
        provider: "google".to_string(),
        external_account_id: format!("UC{}", Uuid::new_v4().simple()),
        platform_type: Some(PlatformType::Youtube),
        encrypted_refresh_token: refresh_token.map(|t| cipher.encrypt(t).expect("encrypt")),
        access_token: None,
        expires_at: None,
        created_at: now,
        updated_at: now,
    };
    LinkedAccountRepository::upsert(pool, &account)
        .await
        .expect("Failed to insert linked account");
    account
}

/// Overwrites the stored ciphertext with an arbitrary value
pub async fn overwrite_ciphertext(pool: &SqlitePool, account_id: Uuid, value: &str) {
    sqlx::query("UPDATE linked_accounts SET encrypted_refresh_token = ? WHERE id = ?")
        .bind(value)
        .bind(account_id.to_string())
        .execute(pool)
        .await
        .expect("Failed to overwrite ciphertext");
}

/// Inserts a session row as the sign-in framework would
pub async fn insert_session(pool: &SqlitePool, identity_id: Uuid) -> String {
    let token = format!("session-{}", Uuid::new_v4());
    let now = Utc::now();

    sqlx::query(
        "INSERT INTO sessions (id, session_token, identity_id, expires_at, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&token)
    .bind(identity_id.to_string())
    .bind((now + Duration::days(30)).timestamp())
    .bind(now.timestamp())
    .execute(pool)
    .await
    .expect("Failed to insert session");

    token
}
