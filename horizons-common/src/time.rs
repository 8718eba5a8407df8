//! Timestamp utilities

use chrono::{DateTime, NaiveDate, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current UTC calendar date
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Long date used on the legal pages, e.g. "October 18, 2026"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Short chart label, e.g. "Oct 18"
pub fn chart_label(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800);
    }

    #[test]
    fn test_today_matches_now() {
        assert_eq!(today(), now().date_naive());
    }

    #[test]
    fn test_long_date_format() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 8).unwrap();
        assert_eq!(long_date(date), "October 08, 2026");
    }

    #[test]
    fn test_chart_label_format() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(chart_label(date), "Jan 05");
    }
}
