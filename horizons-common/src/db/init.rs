//! Database initialization
//!
//! Opens (creating when missing) the SQLite database and applies the schema.
//! All CREATE statements are idempotent, so this runs on every startup.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Open the database at `database_url` and create tables if needed
///
/// `database_url` is a sqlx SQLite URL such as
/// `sqlite:///var/lib/healing-horizons/recovery.db`.
pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    // Connection options apply to every pooled connection
    // WAL allows concurrent readers alongside the single writer
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    info!("Opened database: {}", database_url);

    create_schema(&pool).await?;

    Ok(pool)
}

/// Single-connection in-memory database with the full schema
///
/// One connection only: every SQLite `:memory:` connection is a separate
/// database.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables and indexes
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_users_table(pool).await?;
    create_journal_entries_table(pool).await?;
    create_progress_table(pool).await?;

    info!("Database tables initialized (users, journal_entries, progress)");

    Ok(())
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            location TEXT DEFAULT 'India',
            recovery_stage TEXT DEFAULT 'initial'
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_journal_entries_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS journal_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id),
            content TEXT NOT NULL,
            mood TEXT,
            tags TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_journal_entries_user ON journal_entries(user_id, created_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_progress_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS progress (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id),
            date DATE NOT NULL DEFAULT CURRENT_DATE,
            mood_score INTEGER CHECK (mood_score BETWEEN 1 AND 10),
            activity_score INTEGER CHECK (activity_score BETWEEN 1 AND 10),
            social_score INTEGER CHECK (social_score BETWEEN 1 AND 10),
            notes TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_progress_user ON progress(user_id, date)")
        .execute(pool)
        .await?;

    Ok(())
}
