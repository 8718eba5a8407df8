//! Database models

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Registered user (currently only the shared guest account)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
    pub location: Option<String>,
    pub recovery_stage: Option<String>,
}

/// Fields required to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub location: String,
    pub recovery_stage: String,
}

/// One journal entry written by a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct JournalEntry {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub mood: Option<String>,
    pub tags: Option<String>,
    pub created_at: NaiveDateTime,
}

impl JournalEntry {
    /// Comma-separated tags, trimmed, empties dropped
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    pub user_id: i64,
    pub content: String,
    pub mood: String,
    pub tags: String,
}

/// Daily progress snapshot, scores on a 1-10 scale
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Progress {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub mood_score: Option<i64>,
    pub activity_score: Option<i64>,
    pub social_score: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewProgress {
    pub user_id: i64,
    pub mood_score: i64,
    pub activity_score: i64,
    pub social_score: i64,
    pub notes: Option<String>,
}
