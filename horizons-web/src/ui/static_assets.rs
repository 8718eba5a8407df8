//! Static asset handlers
//!
//! Embeds and serves CSS/JS files at compile time

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::AppState;

const HORIZONS_CSS: &str = include_str!("../../static/horizons.css");
const HORIZONS_JS: &str = include_str!("../../static/horizons.js");

/// Build static asset routes
pub fn static_routes() -> Router<AppState> {
    Router::new()
        .route("/static/horizons.css", get(serve_horizons_css))
        .route("/static/horizons.js", get(serve_horizons_js))
}

/// GET /static/horizons.css
pub async fn serve_horizons_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "public, max-age=3600"),
        ],
        HORIZONS_CSS,
    )
        .into_response()
}

/// GET /static/horizons.js
///
/// Mood check widget, contact form, delete confirmation, flash dismissal
pub async fn serve_horizons_js() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "application/javascript"),
            ("cache-control", "public, max-age=3600"),
        ],
        HORIZONS_JS,
    )
        .into_response()
}
