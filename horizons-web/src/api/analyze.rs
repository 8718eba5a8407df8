//! Quick mood check endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use horizons_common::db::users;
use horizons_common::mood::analyze_mood;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::session::Session;
use crate::{ApiError, ApiResult, AppState};

/// Build mood analysis routes
pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze))
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Mood name; crisis is reported as "Support Needed"
    pub mood: &'static str,
    pub message: &'static str,
    pub next_steps: [&'static str; 3],
}

/// POST /analyze
///
/// Classifies `text` and suggests next steps. Improving or struggling moods
/// also become the user's recovery stage.
async fn analyze(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Some(user) = session.user else {
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Not authenticated" })),
        )
            .into_response());
    };

    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let mood = analyze_mood(&request.text);
    if mood.updates_recovery_stage() {
        users::update_recovery_stage(&state.db, user.id, mood.as_str()).await?;
    }

    info!(user_id = user.id, mood = mood.as_str(), "Mood analyzed");

    Ok(Json(AnalyzeResponse {
        mood: mood.display_label(),
        message: "Analysis complete",
        next_steps: mood.suggestions(),
    })
    .into_response())
}
