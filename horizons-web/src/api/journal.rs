//! Journal pages: list, create and delete entries

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use horizons_common::db::{journal, progress, NewJournalEntry, NewProgress};
use horizons_common::mood::journal_mood_score;
use serde::Deserialize;
use tracing::info;

use crate::error::PageError;
use crate::session::{Flash, Session};
use crate::ui::pages::journal_body;
use crate::ui::render_page;
use crate::{AppState, PageResult};

/// Activity and social scores recorded with every journal snapshot
const DEFAULT_ACTIVITY_SCORE: i64 = 6;
const DEFAULT_SOCIAL_SCORE: i64 = 5;

/// Build journal routes (feature-gated)
pub fn journal_routes() -> Router<AppState> {
    Router::new()
        .route("/journal", get(journal_page).post(save_entry))
        .route("/delete_entry/:entry_id", post(delete_entry))
}

#[derive(Debug, Default, Deserialize)]
pub struct JournalForm {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub tags: String,
}

/// GET /journal
async fn journal_page(State(state): State<AppState>, session: Session) -> PageResult<Response> {
    let Some(user) = session.user.as_ref() else {
        return Ok(Redirect::to("/").into_response());
    };

    let entries = journal::list_for_user(&state.db, user.id, None).await?;

    Ok(render_page(&state, &session, "/journal", "My Journal", &journal_body(&entries), vec![]))
}

/// POST /journal
///
/// Saves the entry and, with progress tracking on, a progress snapshot
/// scored from the mood tag.
async fn save_entry(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<JournalForm>,
) -> PageResult<Response> {
    let Some(user) = session.user.as_ref() else {
        return Ok(Redirect::to("/").into_response());
    };

    let content = form.content.trim();
    if content.is_empty() {
        return Ok(session.redirect_with("/journal", Flash::error("Journal entry cannot be empty")));
    }

    let mood = match form.mood.trim() {
        "" => "neutral".to_string(),
        m => m.to_lowercase(),
    };

    let entry = journal::create_entry(
        &state.db,
        &NewJournalEntry {
            user_id: user.id,
            content: content.to_string(),
            mood: mood.clone(),
            tags: form.tags.trim().to_string(),
        },
    )
    .await?;

    if state.config.features.enable_progress_tracking {
        progress::record_snapshot(
            &state.db,
            &NewProgress {
                user_id: user.id,
                mood_score: journal_mood_score(&mood),
                activity_score: DEFAULT_ACTIVITY_SCORE,
                social_score: DEFAULT_SOCIAL_SCORE,
                notes: None,
            },
        )
        .await?;
    }

    info!(user_id = user.id, entry_id = entry.id, mood = %mood, "Journal entry saved");

    Ok(session.redirect_with("/journal", Flash::success("Journal entry saved!")))
}

/// POST /delete_entry/:entry_id
async fn delete_entry(
    State(state): State<AppState>,
    session: Session,
    Path(entry_id): Path<i64>,
    headers: HeaderMap,
) -> PageResult<Response> {
    let Some(user) = session.user.as_ref() else {
        return Ok(Redirect::to("/").into_response());
    };

    let entry = journal::find_entry(&state.db, entry_id)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("journal entry {}", entry_id)))?;

    if entry.user_id != user.id {
        tracing::warn!(user_id = user.id, entry_id, "Refusing to delete another user's entry");
        return Ok(session.redirect_with("/journal", Flash::error("Unauthorized action")));
    }

    journal::delete_entry(&state.db, entry_id).await?;
    info!(user_id = user.id, entry_id, "Journal entry deleted");

    let back = referer_path(&headers).unwrap_or_else(|| "/dashboard".to_string());
    Ok(session.redirect_with(&back, Flash::success("Entry deleted successfully")))
}

/// Local path (plus query) of the `Referer` header
///
/// Only the path is kept, so a redirect never leaves this site.
pub fn referer_path(headers: &HeaderMap) -> Option<String> {
    let referer = headers.get(header::REFERER)?.to_str().ok()?.trim();

    match reqwest::Url::parse(referer) {
        Ok(url) => {
            let mut path = url.path().to_string();
            if let Some(query) = url.query() {
                path.push('?');
                path.push_str(query);
            }
            Some(path)
        }
        Err(_) if referer.starts_with('/') && !referer.starts_with("//") => Some(referer.to_string()),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_referer(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::REFERER, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_referer_path() {
        assert_eq!(
            referer_path(&with_referer("http://localhost:5000/journal")),
            Some("/journal".to_string())
        );
        assert_eq!(
            referer_path(&with_referer("https://evil.example/dashboard?x=1")),
            Some("/dashboard?x=1".to_string())
        );
        assert_eq!(referer_path(&with_referer("/dashboard")), Some("/dashboard".to_string()));
        assert_eq!(referer_path(&with_referer("//evil.example/x")), None);
        assert_eq!(referer_path(&HeaderMap::new()), None);
    }
}
