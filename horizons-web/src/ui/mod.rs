//! HTML rendering for the web interface
//!
//! Pages are assembled from `format!` templates; every piece of user or AI
//! text passes through [`escape`] or [`markdown::render_markdown`].
//!
//! - **Layout** (this module): page shell, navigation, flash messages
//! - **Pages** (`pages`): page bodies
//! - **Content** (`content`): helplines, therapy platforms, community samples
//! - **Markdown** (`markdown`): persona reply rendering
//! - **Static Assets** (`static_assets`): embedded CSS/JS

pub mod content;
pub mod markdown;
pub mod pages;
mod static_assets;

pub use static_assets::static_routes;

use axum::response::{Html, IntoResponse, Response};
use horizons_common::config::AppConfig;

use crate::session::{append_cookie, clear_flash_cookie, Flash, Session};
use crate::AppState;

/// Navigation entries: (path, label, feature gate)
fn nav_items(config: &AppConfig) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![("/", "Home"), ("/dashboard", "Dashboard")];
    if config.features.enable_journal {
        items.push(("/journal", "Journal"));
    }
    items.push(("/resources", "Resources"));
    if config.features.enable_community {
        items.push(("/community", "Community"));
    }
    items.push(("/about", "About"));
    items.push(("/contact", "Contact"));
    items
}

/// HTML-escape text for element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_flashes(flashes: &[Flash]) -> String {
    if flashes.is_empty() {
        return String::new();
    }
    let items: String = flashes
        .iter()
        .map(|f| {
            format!(
                r#"<div class="flash flash-{}" role="alert">{}<button type="button" class="flash-close" aria-label="Dismiss">&times;</button></div>"#,
                f.category.as_str(),
                escape(&f.message)
            )
        })
        .collect();
    format!(r#"<div class="flashes">{}</div>"#, items)
}

/// Full HTML document around `body`
pub fn layout(config: &AppConfig, active: &str, title: &str, flashes: &[Flash], body: &str) -> String {
    let nav: String = nav_items(config)
        .into_iter()
        .map(|(path, label)| {
            let class = if path == active { r#" class="active""# } else { "" };
            format!(r#"<a href="{}"{}>{}</a>"#, path, class, label)
        })
        .collect();

    let locale = &config.locale;

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Healing Horizons</title>
    <link rel="stylesheet" href="/static/horizons.css">
</head>
<body>
    <header class="site-header">
        <a href="/" class="brand">🌅 Healing Horizons</a>
        <nav>{nav}</nav>
    </header>
    <main>
        {flashes}
        {body}
    </main>
    <footer class="site-footer">
        <p>Healing Horizons · Breakup recovery support for {country}</p>
        <p class="crisis-line">In crisis? Call Vandrevala Foundation 1860-266-2345 (24/7)</p>
        <p><a href="/privacy">Privacy</a> · <a href="/terms">Terms</a> · <a href="/contact">Contact</a></p>
        <p class="locale"><small>Prices in {currency} · Times shown for {timezone}</small></p>
    </footer>
    <script src="/static/horizons.js"></script>
</body>
</html>
"#,
        title = escape(title),
        nav = nav,
        flashes = render_flashes(flashes),
        body = body,
        country = escape(&locale.country),
        currency = escape(&locale.currency),
        timezone = escape(&locale.timezone),
    )
}

/// Render a page, consuming the session's pending flashes
///
/// `extra` flashes are shown on this page only (e.g. a fallback notice).
pub fn render_page(
    state: &AppState,
    session: &Session,
    active: &str,
    title: &str,
    body: &str,
    extra: Vec<Flash>,
) -> Response {
    let mut flashes = session.flashes.clone();
    flashes.extend(extra);

    let html = layout(&state.config, active, title, &flashes, body);
    let mut response = Html(html).into_response();
    if !session.flashes.is_empty() {
        append_cookie(response.headers_mut(), &clear_flash_cookie());
    }
    response
}
