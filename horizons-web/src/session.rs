//! Cookie sessions and flash messages
//!
//! The session cookie carries `{user_id}.{signature}` (see
//! [`horizons_common::auth::sign_session`]). Flash messages travel in a
//! second cookie as hex-encoded JSON and are cleared by the next rendered
//! page.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use horizons_common::auth::{sign_session, verify_session};
use horizons_common::db::{users, User};
use serde::{Deserialize, Serialize};

use crate::AppState;

pub const SESSION_COOKIE: &str = "horizons_session";
pub const FLASH_COOKIE: &str = "horizons_flash";

/// Flash message severity; doubles as the CSS class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Info,
    Warning,
    Error,
}

impl FlashCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashCategory::Success => "success",
            FlashCategory::Info => "info",
            FlashCategory::Warning => "warning",
            FlashCategory::Error => "error",
        }
    }
}

/// One-shot message shown on the next rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn new(category: FlashCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Error, message)
    }
}

/// Request session: signed-in user (if any) and pending flash messages
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user: Option<User>,
    pub flashes: Vec<Flash>,
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let flashes = read_cookie(&parts.headers, FLASH_COOKIE)
            .map(decode_flashes)
            .unwrap_or_default();

        let user_id = read_cookie(&parts.headers, SESSION_COOKIE)
            .and_then(|token| verify_session(token, &state.config.secret_key));

        let user = match user_id {
            Some(id) => users::find_by_id(&state.db, id).await.map_err(|e| {
                tracing::error!(error = %e, "Session user lookup failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            })?,
            None => None,
        };

        if user_id.is_some() && user.is_none() {
            tracing::debug!(user_id = ?user_id, "Session refers to a missing user");
        }

        Ok(Self { user, flashes })
    }
}

impl Session {
    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    /// Redirect, carrying pending flashes plus `flash` to the next page
    pub fn redirect_with(&self, to: &str, flash: Flash) -> Response {
        let mut flashes = self.flashes.clone();
        flashes.push(flash);
        redirect_with_flashes(to, &flashes)
    }
}

/// `Set-Cookie` value for a signed session
pub fn session_cookie(user_id: i64, secret: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE,
        sign_session(user_id, secret)
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value holding `flashes`
pub fn flash_cookie(flashes: &[Flash]) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        FLASH_COOKIE,
        encode_flashes(flashes)
    )
}

/// `Set-Cookie` value that deletes the flash cookie
pub fn clear_flash_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", FLASH_COOKIE)
}

/// 303 redirect to `to` with `flashes` queued for the next page
pub fn redirect_with_flashes(to: &str, flashes: &[Flash]) -> Response {
    let mut response = Redirect::to(to).into_response();
    if !flashes.is_empty() {
        append_cookie(response.headers_mut(), &flash_cookie(flashes));
    }
    response
}

/// Add a `Set-Cookie` header
pub fn append_cookie(headers: &mut HeaderMap, cookie: &str) {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            headers.append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::warn!(error = %e, "Dropping unencodable cookie"),
    }
}

/// Value of cookie `name` from any `Cookie` header
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

fn encode_flashes(flashes: &[Flash]) -> String {
    // Serializing a Vec of plain structs cannot fail
    hex::encode(serde_json::to_vec(flashes).unwrap_or_default())
}

/// Decode the flash cookie; anything malformed yields no messages
pub fn decode_flashes(raw: &str) -> Vec<Flash> {
    hex::decode(raw)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}
