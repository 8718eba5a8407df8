//! Shared fixtures for horizons-web integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use horizons_common::config::AppConfig;
use horizons_common::db::init_memory_database;
use horizons_web::ai::{AiError, ChatBackend, Persona};
use horizons_web::session::{decode_flashes, Flash, FLASH_COOKIE, SESSION_COOKIE};
use horizons_web::{build_router, AppState};
use http_body_util::BodyExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        secret_key: TEST_SECRET.to_string(),
        session_cookie_secure: false,
        ..AppConfig::default()
    }
}

/// App state over a fresh in-memory database
pub async fn test_state(config: AppConfig, backend: Option<Arc<dyn ChatBackend>>) -> AppState {
    let db = init_memory_database().await.unwrap();
    AppState::with_backend(db, config, backend)
}

pub async fn test_app() -> (Router, AppState) {
    let state = test_state(test_config(), None).await;
    (build_router(state.clone()), state)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn post_json(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// `name=value` part of the Set-Cookie for `name`, if any
pub fn cookie_pair(response: &Response<Body>, name: &str) -> Option<String> {
    set_cookies(response)
        .into_iter()
        .find(|c| c.starts_with(&format!("{}=", name)))
        .and_then(|c| c.split(';').next().map(str::to_string))
}

/// Flash messages queued by `response`
pub fn flashes(response: &Response<Body>) -> Vec<Flash> {
    cookie_pair(response, FLASH_COOKIE)
        .and_then(|pair| pair.split_once('=').map(|(_, v)| decode_flashes(v)))
        .unwrap_or_default()
}

pub fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

/// Sign in as the guest via `GET /` and return the session cookie pair
pub async fn guest_cookie(app: &Router) -> String {
    let response = send(app, get("/", None)).await;
    cookie_pair(&response, SESSION_COOKIE).expect("GET / should sign in the guest")
}

/// Chat backend answering every persona with fixed text, or failing
pub struct MockBackend {
    pub reply: Result<String, (u16, String)>,
    pub calls: AtomicUsize,
}

impl MockBackend {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err((status, body.to_string())),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    async fn ensure_ready(&self) -> Result<(), AiError> {
        Ok(())
    }

    async fn complete(&self, persona: Persona, _prompt: &str) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(format!("{} for {}", text, persona.key())),
            Err((status, body)) => Err(AiError::Api(*status, body.clone())),
        }
    }
}
