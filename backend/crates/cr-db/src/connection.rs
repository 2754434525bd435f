use crate::{DbError, Result as DbErrorResult};

use cr_core::ErrorLocation;

use std::panic::Location;
use std::path::Path;
use std::time::Duration;

use sqlx::Transaction;
use sqlx::sqlite::{
    Sqlite, SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions,
};

const MAX_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open (creating if missing) the identity database and bring its schema up to date.
pub async fn connect(db_path: &Path) -> DbErrorResult<SqlitePool> {
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DbError::Initialization {
                message: format!("Failed to create database directory: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    log::debug!("Identity database ready at {}", db_path.display());

    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> DbErrorResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DbError::Migration {
            message: format!("Migration failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(())
}

/// Begin a transaction that holds the write lock from its first statement.
///
/// Required for units that read before they write: a deferred transaction
/// cannot upgrade its lock under contention and fails with `SQLITE_BUSY`
/// regardless of the busy timeout.
pub async fn begin_immediate(pool: &SqlitePool) -> DbErrorResult<Transaction<'static, Sqlite>> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}
