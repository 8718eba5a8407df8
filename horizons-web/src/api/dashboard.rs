//! Dashboard page

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use horizons_common::db::{journal, progress};
use horizons_common::stats::{chart_series, daily_affirmation, DashboardStats};

use crate::session::Session;
use crate::ui::pages::{dashboard_body, DashboardView};
use crate::ui::render_page;
use crate::{AppState, PageResult};

const RECENT_ENTRIES: usize = 5;
const PROGRESS_DAYS: i64 = 7;

/// Build dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

/// GET /dashboard
async fn dashboard(State(state): State<AppState>, session: Session) -> PageResult<Response> {
    let Some(user) = session.user.as_ref() else {
        return Ok(Redirect::to("/").into_response());
    };

    // Newest first
    let entries = journal::list_for_user(&state.db, user.id, None).await?;

    let progress_enabled = state.config.features.enable_progress_tracking;
    let progress_rows = if progress_enabled {
        progress::recent_for_user(&state.db, user.id, PROGRESS_DAYS).await?
    } else {
        Vec::new()
    };

    let stats = DashboardStats::from_entries(&entries, horizons_common::time::now().naive_utc());
    let chart = chart_series(&progress_rows);

    let view = DashboardView {
        username: &user.username,
        recovery_stage: user.recovery_stage.as_deref().unwrap_or("initial"),
        entries: &entries[..entries.len().min(RECENT_ENTRIES)],
        progress: &progress_rows,
        stats: &stats,
        affirmation: daily_affirmation(),
        chart: progress_enabled.then_some(&chart),
        journal_enabled: state.config.features.enable_journal,
    };

    Ok(render_page(&state, &session, "/dashboard", "Dashboard", &dashboard_body(&view), vec![]))
}
