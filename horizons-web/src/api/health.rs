//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status ("ok")
    pub status: String,
    /// Module name ("horizons-web")
    pub module: String,
    /// Crate version from Cargo.toml
    pub version: String,
    /// Short commit hash captured by build.rs
    pub git_hash: String,
    /// UTC build time captured by build.rs
    pub build_timestamp: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
    /// An AI API key is configured
    pub ai_configured: bool,
    /// Rate-limit cooldown is active; plans use fallback content
    pub ai_rate_limited: bool,
    /// Whole seconds until AI calls resume; absent when not rate-limited
    pub ai_cooldown_remaining_secs: Option<u64>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = uptime.num_seconds().max(0) as u64;

    let (ai_rate_limited, ai_cooldown_remaining_secs) = match &state.planner {
        Some(planner) if planner.gate().is_limited().await => {
            let left = planner.gate().remaining().await;
            (true, left.map(|d| d.as_secs()))
        }
        _ => (false, None),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        module: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: env!("GIT_HASH").to_string(),
        build_timestamp: env!("BUILD_TIMESTAMP").to_string(),
        uptime_seconds,
        ai_configured: state.planner.is_some(),
        ai_rate_limited,
        ai_cooldown_remaining_secs,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
