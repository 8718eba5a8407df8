//! Progress snapshot queries

use crate::db::models::{NewProgress, Progress};
use crate::Result;
use sqlx::SqlitePool;

/// Record a snapshot dated today
pub async fn record_snapshot(pool: &SqlitePool, snapshot: &NewProgress) -> Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO progress (user_id, mood_score, activity_score, social_score, notes)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(snapshot.user_id)
    .bind(snapshot.mood_score)
    .bind(snapshot.activity_score)
    .bind(snapshot.social_score)
    .bind(&snapshot.notes)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Most recent snapshots, newest date first
pub async fn recent_for_user(pool: &SqlitePool, user_id: i64, limit: i64) -> Result<Vec<Progress>> {
    let rows = sqlx::query_as::<_, Progress>(
        r#"
        SELECT id, user_id, date, mood_score, activity_score, social_score, notes
        FROM progress
        WHERE user_id = ?
        ORDER BY date DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
