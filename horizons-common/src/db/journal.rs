//! Journal entry queries

use crate::db::models::{JournalEntry, NewJournalEntry};
use crate::{Error, Result};
use sqlx::SqlitePool;

const ENTRY_COLUMNS: &str = "id, user_id, content, mood, tags, created_at";

pub async fn create_entry(pool: &SqlitePool, entry: &NewJournalEntry) -> Result<JournalEntry> {
    let id = sqlx::query(
        "INSERT INTO journal_entries (user_id, content, mood, tags) VALUES (?, ?, ?, ?)",
    )
    .bind(entry.user_id)
    .bind(&entry.content)
    .bind(&entry.mood)
    .bind(&entry.tags)
    .execute(pool)
    .await?
    .last_insert_rowid();

    find_entry(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Journal entry {} vanished after insert", id)))
}

pub async fn find_entry(pool: &SqlitePool, id: i64) -> Result<Option<JournalEntry>> {
    let entry = sqlx::query_as::<_, JournalEntry>(&format!(
        "SELECT {} FROM journal_entries WHERE id = ?",
        ENTRY_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(entry)
}

/// Entries for a user, newest first
///
/// `limit = None` returns every entry.
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
    limit: Option<i64>,
) -> Result<Vec<JournalEntry>> {
    // SQLite treats a negative LIMIT as "no limit"
    let entries = sqlx::query_as::<_, JournalEntry>(&format!(
        "SELECT {} FROM journal_entries WHERE user_id = ? ORDER BY created_at DESC, id DESC LIMIT ?",
        ENTRY_COLUMNS
    ))
    .bind(user_id)
    .bind(limit.unwrap_or(-1))
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Total entries across all users
pub async fn count_entries(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM journal_entries")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn delete_entry(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM journal_entries WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Journal entry {}", id)));
    }
    Ok(())
}
