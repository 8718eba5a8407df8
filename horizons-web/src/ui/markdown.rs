//! Markdown rendering for persona replies

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// URL schemes allowed in link and image targets
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Render AI markdown to HTML
///
/// Tables, strikethrough and task lists are enabled. Raw HTML in the input
/// is emitted as escaped text, never as markup. Link and image targets with
/// any scheme other than http, https, mailto or tel are replaced by `#`.
pub fn render_markdown(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    // Browsers ignore whitespace and control characters inside a scheme
    let compact: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();

    let scheme = compact
        .split_once(':')
        .map(|(head, _)| head)
        .filter(|head| !head.contains(['/', '?', '#']));

    match scheme {
        None => url,
        Some(scheme) if ALLOWED_SCHEMES.iter().any(|s| scheme.eq_ignore_ascii_case(s)) => url,
        Some(_) => CowStr::Borrowed("#"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = render_markdown("**Week 1**\n\n- Day 1\n- ~~Day 2~~");
        assert!(html.contains("<strong>Week 1</strong>"));
        assert!(html.contains("<li>Day 1</li>"));
        assert!(html.contains("<del>Day 2</del>"));
    }

    #[test]
    fn test_tables_and_fenced_code() {
        let html = render_markdown("| Day | Task |\n|---|---|\n| 1 | Walk |\n\n```\ncode\n```");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>Walk</td>"));
        assert!(html.contains("<pre><code>code\n</code></pre>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("Hello <script>alert(1)</script>\n\n<div onclick=\"x\">hi</div>");
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<div onclick"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_markdown("   "), "");
    }

    #[test]
    fn test_unsafe_link_targets_are_neutralized() {
        let html = render_markdown(
            "[x](javascript:alert(1)) [y](JavaScript:alert(2)) ![i](data:text/html;base64,AAAA)",
        );
        assert!(!html.to_lowercase().contains("javascript:"), "{}", html);
        assert!(!html.contains("data:"), "{}", html);
        assert!(html.contains(r##"<a href="#">x</a>"##), "{}", html);
        assert!(html.contains(r##"<img src="#" alt="i""##), "{}", html);
    }

    #[test]
    fn test_safe_link_targets_are_kept() {
        let html = render_markdown(
            "[site](https://icallhelpline.org) [mail](mailto:help@example.com) [call](tel:18602662345) [home](/dashboard)",
        );
        assert!(html.contains(r#"href="https://icallhelpline.org""#));
        assert!(html.contains(r#"href="mailto:help@example.com""#));
        assert!(html.contains(r#"href="tel:18602662345""#));
        assert!(html.contains(r#"href="/dashboard""#));
    }
}
