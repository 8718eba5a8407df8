//! Recovery plan generation and results

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::ai::{Notice, PlanDuration};
use crate::session::{Flash, FlashCategory, Session};
use crate::ui::pages::results_body;
use crate::ui::render_page;
use crate::AppState;

/// Build plan routes
pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/generate_plan", get(generate_plan).post(generate_plan))
        .route("/results", get(results))
}

/// Plan request; read from the query string on GET, the form body on POST
#[derive(Debug, Default, Deserialize)]
pub struct PlanForm {
    #[serde(default)]
    pub user_input: String,
    #[serde(default)]
    pub plan_type: String,
}

fn notice_flash(notice: Notice) -> Flash {
    let category = if notice.is_warning() {
        FlashCategory::Warning
    } else {
        FlashCategory::Info
    };
    Flash::new(category, notice.message())
}

/// GET|POST /generate_plan
async fn generate_plan(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PlanForm>,
) -> Response {
    let Some(user) = session.user.as_ref() else {
        return Redirect::to("/").into_response();
    };

    let situation = form.user_input.trim();
    if situation.is_empty() {
        return session.redirect_with("/", Flash::error("Please describe your situation"));
    }

    let Some(planner) = state.planner.as_ref() else {
        tracing::warn!("Plan requested but no AI API key is configured");
        return session.redirect_with("/", Flash::error("API key not configured"));
    };

    let plan = PlanDuration::from_form(&form.plan_type);
    let outcome = planner.generate(situation, plan).await;

    info!(
        user_id = user.id,
        plan = %plan,
        fallbacks = outcome.fallback_count(),
        notice = ?outcome.notice,
        "Generated recovery plan"
    );

    let body = results_body(&outcome);
    let extra: Vec<Flash> = outcome.notice.map(notice_flash).into_iter().collect();

    state.last_plans.write().await.insert(user.id, outcome);

    render_page(&state, &session, "", "Your Healing Plan", &body, extra)
}

/// GET /results
///
/// Shows this user's most recent plan again.
async fn results(State(state): State<AppState>, session: Session) -> Response {
    let Some(user) = session.user.as_ref() else {
        return Redirect::to("/").into_response();
    };

    let body = {
        let plans = state.last_plans.read().await;
        plans.get(&user.id).map(results_body)
    };

    match body {
        Some(body) => render_page(&state, &session, "", "Your Healing Plan", &body, vec![]),
        None => session.redirect_with("/", Flash::info("Create a recovery plan to see your results")),
    }
}
