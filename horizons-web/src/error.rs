//! Error types for horizons-web
//!
//! JSON endpoints return [`ApiError`]; HTML page handlers return
//! [`PageError`], which logs and sends the visitor somewhere safe.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::session::{redirect_with_flashes, Flash};
use crate::ui;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// horizons-common error
    #[error("Common error: {0}")]
    Common(#[from] horizons_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use horizons_common::Error as CommonError;

        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            ApiError::Common(CommonError::NotFound(msg)) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Common(CommonError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
            ApiError::Common(CommonError::Conflict(msg)) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::Common(ref err) => {
                tracing::error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "COMMON_ERROR",
                    err.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Page handler error
#[derive(Debug, Error)]
pub enum PageError {
    /// Renders the "not found" page (404)
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Common(#[from] horizons_common::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound(what) | PageError::Common(horizons_common::Error::NotFound(what)) => {
                tracing::info!(what = %what, "Page not found");
                (StatusCode::NOT_FOUND, Html(ui::pages::not_found_page())).into_response()
            }
            PageError::Common(err) => {
                tracing::error!(error = %err, "Page request failed");
                redirect_with_flashes(
                    "/",
                    &[Flash::error("Something went wrong. Please try again.")],
                )
            }
        }
    }
}

/// Result type for page handlers
pub type PageResult<T> = Result<T, PageError>;
