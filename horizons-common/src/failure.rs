//! Provider failure classification
//!
//! The AI provider reports rate limiting in several shapes: HTTP 429 text,
//! JSON error bodies, or plain "quota exceeded" prose. These helpers turn
//! any of them into a [`FailureKind`].

use serde::Serialize;
use serde_json::Value;

const RATE_LIMIT_KEYWORDS: &[&str] = &[
    "rate",
    "limit",
    "quota",
    "exceeded",
    "ratelimit",
    "tokens per day",
    "tpd",
    "429",
];

/// Category of a failed provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Provider refused because of rate limits or quota
    RateLimited,
    /// Call exceeded its time budget
    Timeout,
    /// Anything else (network, parse, server error)
    Other,
}

/// True when the message mentions any rate-limit keyword
pub fn is_rate_limit_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    RATE_LIMIT_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Classify a failure message
///
/// Timeouts are checked first so a slow call never marks the provider as
/// rate-limited.
///
/// # Examples
///
/// ```
/// use horizons_common::failure::{classify_failure, FailureKind};
///
/// assert_eq!(classify_failure("429 Too Many Requests"), FailureKind::RateLimited);
/// assert_eq!(classify_failure("request timeout"), FailureKind::Timeout);
/// assert_eq!(classify_failure("connection refused"), FailureKind::Other);
/// ```
pub fn classify_failure(message: &str) -> FailureKind {
    if message.to_lowercase().contains("timeout") {
        FailureKind::Timeout
    } else if is_rate_limit_message(message) {
        FailureKind::RateLimited
    } else {
        FailureKind::Other
    }
}

/// Detect an error payload returned in place of content
///
/// Returns `Some(message)` when `text` is a JSON object with an `error` key.
/// The message is `error.message`, or an empty string when absent.
///
/// # Examples
///
/// ```
/// use horizons_common::failure::sniff_error_payload;
///
/// let body = r#"{"error":{"message":"Rate limit reached","code":"rate_limit_exceeded"}}"#;
/// assert_eq!(sniff_error_payload(body).as_deref(), Some("Rate limit reached"));
/// assert_eq!(sniff_error_payload("# Healing takes time"), None);
/// ```
pub fn sniff_error_payload(text: &str) -> Option<String> {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(Value::Object(map)) => map
            .get("error")
            .map(|error| error_message(error).unwrap_or_default()),
        _ => None,
    }
}

/// Pull the provider message out of an error string
///
/// Error strings often wrap the provider's JSON body, e.g.
/// `Error code: 429 - {"error": {"message": "..."}}`. When such a payload is
/// found its `error.message` is returned; otherwise the text itself.
pub fn extract_error_message(text: &str) -> String {
    if !text.contains("error") {
        return text.to_string();
    }
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return text.to_string();
    };
    if end <= start {
        return text.to_string();
    }

    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(map)) if map.contains_key("error") => {
            error_message(&map["error"]).unwrap_or_else(|| text.to_string())
        }
        _ => text.to_string(),
    }
}

fn error_message(error: &Value) -> Option<String> {
    error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_rate_limit_messages_are_detected() {
        let messages = [
            "Rate limit reached for model llama-3.3-70b-versatile",
            "Limit 100000, Used 99997, Requested 125",
            r#"{"error":{"message":"Rate limit reached","type":"tokens","code":"ratelimitexceeded"}}"#,
            "429 Too Many Requests",
            "quota exceeded",
            "tokens per day (TPD): Limit 100000",
        ];

        for message in messages {
            assert!(is_rate_limit_message(message), "missed: {}", message);
            assert_eq!(classify_failure(message), FailureKind::RateLimited, "{}", message);
        }
    }

    #[test]
    fn test_non_rate_limit_messages() {
        for message in ["connection refused", "invalid api key", "internal server error"] {
            assert!(!is_rate_limit_message(message), "false positive: {}", message);
            assert_eq!(classify_failure(message), FailureKind::Other);
        }
    }

    #[test]
    fn test_timeout_wins_over_rate_keywords() {
        assert_eq!(classify_failure("timeout"), FailureKind::Timeout);
        assert_eq!(
            classify_failure("Rate limiter timeout after 6s"),
            FailureKind::Timeout
        );
    }

    #[test]
    fn test_sniff_bare_payload_without_message() {
        assert_eq!(sniff_error_payload(r#"{"error": "boom"}"#).as_deref(), Some(""));
        assert_eq!(sniff_error_payload(r#"{"result": "fine"}"#), None);
        assert_eq!(sniff_error_payload(r#"[{"error": 1}]"#), None);
        assert_eq!(sniff_error_payload("Plain markdown {with braces}"), None);
    }

    #[test]
    fn test_extract_embedded_message() {
        let text = r#"Error code: 429 - {"error": {"message": "Rate limit reached for model", "type": "tokens"}}"#;
        assert_eq!(extract_error_message(text), "Rate limit reached for model");

        let no_message = r#"upstream error {"error": {"code": 500}}"#;
        assert_eq!(extract_error_message(no_message), no_message);
    }

    #[test]
    fn test_extract_passes_plain_text_through() {
        assert_eq!(extract_error_message("connection reset"), "connection reset");
        assert_eq!(extract_error_message("An error {not json}"), "An error {not json}");
        assert_eq!(extract_error_message("error } before {"), "error } before {");
    }
}
