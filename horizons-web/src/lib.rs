//! horizons-web library interface
//!
//! Exposes the router and application state for the binary and for
//! integration tests.

pub mod ai;
pub mod api;
pub mod error;
pub mod session;
pub mod ui;

pub use crate::error::{ApiError, ApiResult, PageError, PageResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use horizons_common::config::AppConfig;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::ai::{AiError, ChatBackend, GroqClient, PlanOrchestrator, PlanOutcome};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    /// Persona orchestration; `None` when no API key is configured
    pub planner: Option<Arc<PlanOrchestrator>>,
    /// Most recent plan per user id, for `/results`
    pub last_plans: Arc<RwLock<HashMap<i64, PlanOutcome>>>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// State backed by the Groq client when `groq_api_key` is set
    pub fn new(db: SqlitePool, config: AppConfig) -> Result<Self, AiError> {
        let backend: Option<Arc<dyn ChatBackend>> = match &config.groq_api_key {
            Some(key) => Some(Arc::new(GroqClient::new(
                key.clone(),
                config.groq_model.clone(),
                &config.groq_base_url,
                Duration::from_secs(config.ai_timeout_secs),
            )?)),
            None => None,
        };
        Ok(Self::with_backend(db, config, backend))
    }

    /// State with an explicit chat backend (or none)
    pub fn with_backend(
        db: SqlitePool,
        config: AppConfig,
        backend: Option<Arc<dyn ChatBackend>>,
    ) -> Self {
        let planner = backend.map(|backend| {
            Arc::new(PlanOrchestrator::new(
                backend,
                Duration::from_secs(config.ai_timeout_secs),
                Duration::from_secs(config.rate_limit_cooldown_secs),
            ))
        });

        Self {
            db,
            config: Arc::new(config),
            planner,
            last_plans: Arc::new(RwLock::new(HashMap::new())),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// Routes for disabled features are not registered at all.
pub fn build_router(state: AppState) -> Router {
    let features = state.config.features;
    let body_limit = state.config.max_content_length;

    let mut router = Router::new()
        .merge(api::page_routes())
        .merge(api::dashboard_routes())
        .merge(api::analyze_routes())
        .merge(api::plan_routes())
        .merge(api::contact_routes())
        .merge(api::health_routes())
        .merge(ui::static_routes());

    if features.enable_journal {
        router = router.merge(api::journal_routes());
    }
    if features.enable_community {
        router = router.merge(api::community_routes());
    }

    router
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}
