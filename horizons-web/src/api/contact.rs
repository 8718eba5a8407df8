//! Contact page and message intake

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::session::{append_cookie, flash_cookie, Flash, Session};
use crate::ui::pages::contact_body;
use crate::ui::render_page;
use crate::{ApiError, ApiResult, AppState};

/// Build contact routes
pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/contact", get(contact_page).post(contact_submit))
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// GET /contact
async fn contact_page(State(state): State<AppState>, session: Session) -> Response {
    render_page(&state, &session, "/contact", "Contact Us", &contact_body(), vec![])
}

/// POST /contact
///
/// Messages are logged only; the thank-you is flashed for the next page.
async fn contact_submit(
    session: Session,
    body: Result<Json<ContactMessage>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(message) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    info!(
        name = %message.name,
        email = %message.email,
        subject = %message.subject,
        chars = message.message.chars().count(),
        "Contact message received"
    );

    let mut flashes = session.flashes;
    flashes.push(Flash::success(
        "Thank you for contacting us! We'll respond within 24 hours.",
    ));

    let mut response = Json(json!({
        "status": "success",
        "message": "Message received",
    }))
    .into_response();
    append_cookie(response.headers_mut(), &flash_cookie(&flashes));

    Ok(response)
}
