//! Dashboard statistics derived from journal entries and progress snapshots

use crate::db::models::{JournalEntry, Progress};
use crate::time::chart_label;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

const AFFIRMATIONS: &[&str] = &[
    "I am worthy of love and respect, especially from myself.",
    "Healing is a journey, and I am taking it one day at a time.",
    "My past does not define my future; I am growing every day.",
    "I choose to let go of what I cannot control.",
    "I am resilient, strong, and capable of overcoming this.",
    "Self-love is the greatest middle finger of all time.",
    "It's okay to not be okay, as long as I keep moving forward.",
    "I deserve a life of peace and happiness.",
    "My feelings are valid, but they do not control me.",
    "Every end is a new beginning in disguise.",
];

/// Headline numbers on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_entries: usize,
    pub current_streak: u32,
    pub most_common_mood: String,
    pub days_active: i64,
}

impl DashboardStats {
    pub fn from_entries(entries: &[JournalEntry], now: NaiveDateTime) -> Self {
        Self {
            total_entries: entries.len(),
            current_streak: current_streak(entries, now.date()),
            most_common_mood: title_case(&most_common_mood(entries)),
            days_active: days_active(entries, now),
        }
    }
}

/// Mood and activity series for the dashboard chart, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub moods: Vec<i64>,
    pub activity: Vec<i64>,
}

/// Consecutive days with at least one entry, ending today
///
/// A day without an entry breaks the streak; no entry today means 0.
pub fn current_streak(entries: &[JournalEntry], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = entries.iter().map(|e| e.created_at.date()).collect();

    let mut streak = 0;
    let mut day = today;
    while days.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

/// Most frequent mood tag; ties go to the mood written first
///
/// Order-independent: "first" is the oldest entry by `(created_at, id)`, so
/// the newest-first lists the handlers load give the same answer.
pub fn most_common_mood(entries: &[JournalEntry]) -> String {
    // mood -> (count, oldest (created_at, id) carrying it)
    let mut tally: HashMap<&str, (usize, (NaiveDateTime, i64))> = HashMap::new();

    for entry in entries {
        let Some(mood) = entry.mood.as_deref().filter(|m| !m.is_empty()) else {
            continue;
        };
        let key = (entry.created_at, entry.id);
        let slot = tally.entry(mood).or_insert((0, key));
        slot.0 += 1;
        slot.1 = slot.1.min(key);
    }

    tally
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(mood, _)| mood.to_string())
        .unwrap_or_else(|| "neutral".to_string())
}

/// Whole days since the first entry, plus one; 0 without entries
pub fn days_active(entries: &[JournalEntry], now: NaiveDateTime) -> i64 {
    entries
        .iter()
        .map(|e| e.created_at)
        .min()
        .map(|first| (now - first).num_days() + 1)
        .unwrap_or(0)
}

/// Chart series from progress snapshots in any order
pub fn chart_series(progress: &[Progress]) -> ChartSeries {
    let mut sorted: Vec<&Progress> = progress.iter().collect();
    sorted.sort_by_key(|p| p.date);

    ChartSeries {
        labels: sorted.iter().map(|p| chart_label(p.date)).collect(),
        moods: sorted.iter().map(|p| p.mood_score.unwrap_or(0)).collect(),
        activity: sorted.iter().map(|p| p.activity_score.unwrap_or(0)).collect(),
    }
}

/// Random affirmation for today's visit
pub fn daily_affirmation() -> &'static str {
    AFFIRMATIONS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(AFFIRMATIONS[0])
}

/// "struggling" -> "Struggling"
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn entry(id: i64, created_at: &str, mood: Option<&str>) -> JournalEntry {
        JournalEntry {
            id,
            user_id: 1,
            content: format!("entry {}", id),
            mood: mood.map(str::to_string),
            tags: None,
            created_at: at(created_at),
        }
    }

    fn snapshot(date: &str, mood: Option<i64>, activity: Option<i64>) -> Progress {
        Progress {
            id: 0,
            user_id: 1,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            mood_score: mood,
            activity_score: activity,
            social_score: Some(5),
            notes: None,
        }
    }

    #[test]
    fn test_streak_counts_consecutive_days_ending_today() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let entries = vec![
            entry(1, "2026-03-10 09:00:00", None),
            entry(2, "2026-03-10 21:00:00", None),
            entry(3, "2026-03-09 12:00:00", None),
            entry(4, "2026-03-08 12:00:00", None),
            entry(5, "2026-03-06 12:00:00", None),
        ];
        assert_eq!(current_streak(&entries, today), 3);
    }

    #[test]
    fn test_streak_is_zero_without_entry_today() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let entries = vec![entry(1, "2026-03-09 12:00:00", None)];
        assert_eq!(current_streak(&entries, today), 0);
        assert_eq!(current_streak(&[], today), 0);
    }

    #[test]
    fn test_most_common_mood_tie_goes_to_oldest() {
        // Newest first, as the dashboard loads them
        let entries = vec![
            entry(5, "2026-03-05 12:00:00", None),
            entry(4, "2026-03-04 12:00:00", Some("happy")),
            entry(3, "2026-03-03 12:00:00", Some("sad")),
            entry(2, "2026-03-02 12:00:00", Some("happy")),
            entry(1, "2026-03-01 12:00:00", Some("sad")),
        ];
        assert_eq!(most_common_mood(&entries), "sad");

        let oldest_first: Vec<_> = entries.iter().rev().cloned().collect();
        assert_eq!(most_common_mood(&oldest_first), "sad");

        let more_happy = [vec![entry(6, "2026-03-06 12:00:00", Some("happy"))], entries].concat();
        assert_eq!(most_common_mood(&more_happy), "happy");
    }

    #[test]
    fn test_most_common_mood_same_timestamp_uses_id() {
        let entries = vec![
            entry(8, "2026-03-01 12:00:00", Some("happy")),
            entry(7, "2026-03-01 12:00:00", Some("sad")),
        ];
        assert_eq!(most_common_mood(&entries), "sad");
    }

    #[test]
    fn test_most_common_mood_defaults_to_neutral() {
        assert_eq!(most_common_mood(&[]), "neutral");
        assert_eq!(most_common_mood(&[entry(1, "2026-03-01 12:00:00", Some(""))]), "neutral");
    }

    #[test]
    fn test_days_active() {
        let now = at("2026-03-10 08:00:00");
        let entries = vec![
            entry(1, "2026-03-08 09:00:00", None),
            entry(2, "2026-03-01 10:00:00", None),
        ];
        // 8 full days and some hours since 03-01 10:00
        assert_eq!(days_active(&entries, now), 9);
        assert_eq!(days_active(&[], now), 0);
        assert_eq!(days_active(&[entry(3, "2026-03-10 07:00:00", None)], now), 1);
    }

    #[test]
    fn test_dashboard_stats_title_cases_mood() {
        let now = at("2026-03-10 20:00:00");
        let entries = vec![entry(1, "2026-03-10 09:00:00", Some("happy"))];
        let stats = DashboardStats::from_entries(&entries, now);
        assert_eq!(
            stats,
            DashboardStats {
                total_entries: 1,
                current_streak: 1,
                most_common_mood: "Happy".to_string(),
                days_active: 1,
            }
        );
    }

    #[test]
    fn test_chart_series_sorted_oldest_first() {
        let rows = vec![
            snapshot("2026-03-10", Some(8), Some(6)),
            snapshot("2026-03-08", None, Some(4)),
            snapshot("2026-03-09", Some(3), None),
        ];
        let series = chart_series(&rows);
        assert_eq!(series.labels, vec!["Mar 08", "Mar 09", "Mar 10"]);
        assert_eq!(series.moods, vec![0, 3, 8]);
        assert_eq!(series.activity, vec![4, 0, 6]);
    }

    #[test]
    fn test_affirmation_comes_from_list() {
        assert!(AFFIRMATIONS.contains(&daily_affirmation()));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("struggling"), "Struggling");
        assert_eq!(title_case("NEUTRAL"), "Neutral");
        assert_eq!(title_case(""), "");
    }
}
