//! User queries

use crate::auth::hash_password;
use crate::db::models::{NewUser, User};
use crate::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

/// E-mail of the shared guest account every visitor is signed in as
pub const GUEST_EMAIL: &str = "guest@healing.com";

const USER_COLUMNS: &str =
    "id, username, email, password_hash, created_at, location, recovery_stage";

/// Insert a user, returning the stored row
///
/// Duplicate usernames or e-mails return [`Error::Conflict`].
pub async fn create_user(pool: &SqlitePool, user: &NewUser) -> Result<User> {
    let id = sqlx::query(
        r#"
        INSERT INTO users (username, email, password_hash, location, recovery_stage)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.location)
    .bind(&user.recovery_stage)
    .execute(pool)
    .await
    .map_err(|e| Error::from_write(e, "user"))?
    .last_insert_rowid();

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("User {} vanished after insert", id)))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE id = ?",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE email = ?",
        USER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Store the user's latest recovery stage (e.g. "improving")
pub async fn update_recovery_stage(pool: &SqlitePool, user_id: i64, stage: &str) -> Result<()> {
    let result = sqlx::query("UPDATE users SET recovery_stage = ? WHERE id = ?")
        .bind(stage)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("User {}", user_id)));
    }
    Ok(())
}

/// Find the shared guest account, creating it on first use
pub async fn ensure_guest_user(pool: &SqlitePool) -> Result<User> {
    if let Some(user) = find_by_email(pool, GUEST_EMAIL).await? {
        return Ok(user);
    }

    let guest = NewUser {
        username: "Guest".to_string(),
        email: GUEST_EMAIL.to_string(),
        password_hash: hash_password("guest")?,
        location: "India".to_string(),
        recovery_stage: "healing".to_string(),
    };

    match create_user(pool, &guest).await {
        Ok(user) => {
            info!(user_id = user.id, "Created guest account");
            Ok(user)
        }
        // Lost a race with a concurrent first visit
        Err(Error::Conflict(_)) => find_by_email(pool, GUEST_EMAIL)
            .await?
            .ok_or_else(|| Error::Internal("Guest account missing after conflict".to_string())),
        Err(e) => Err(e),
    }
}
