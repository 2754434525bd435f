use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    cr_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Counts rows in `table` owned by `identity_id`.
pub async fn count_rows(pool: &SqlitePool, table: &str, identity_id: uuid::Uuid) -> i64 {
    let column = if table == "identities" { "id" } else { "identity_id" };

    // Use sqlx::query (not query!) to avoid offline mode issues in tests
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?"))
        .bind(identity_id.to_string())
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
