//! HTTP handlers for horizons-web
//!
//! HTML pages return [`crate::PageResult`]; JSON endpoints return
//! [`crate::ApiResult`].

pub mod analyze;
pub mod contact;
pub mod dashboard;
pub mod health;
pub mod journal;
pub mod pages;
pub mod plan;

pub use analyze::analyze_routes;
pub use contact::contact_routes;
pub use dashboard::dashboard_routes;
pub use health::health_routes;
pub use journal::journal_routes;
pub use pages::{community_routes, page_routes};
pub use plan::plan_routes;
