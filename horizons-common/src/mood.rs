//! Keyword-based mood classification
//!
//! Classifies free text into one of four moods. Crisis language is checked
//! first and always wins over the positive/negative word balance.

use serde::{Deserialize, Serialize};

const POSITIVE_WORDS: &[&str] = &[
    "happy", "better", "improving", "hope", "healing", "strong", "good", "great", "awesome",
    "excited", "peace", "calm", "grateful", "love", "joy", "confident", "optimistic", "proud",
    "won", "success", "growth", "smile", "laugh",
];

const NEGATIVE_WORDS: &[&str] = &[
    "sad", "pain", "hurt", "lonely", "depressed", "angry", "bad", "worse", "broken", "confused",
    "lost", "tears", "anxious", "afraid", "scared", "hate", "miss", "crying", "stuck", "guilty",
    "ashamed", "regret", "dark", "tired",
];

const CRISIS_KEYWORDS: &[&str] = &[
    "die",
    "suicide",
    "kill",
    "end it",
    "no point",
    "give up",
    "death",
    "hurt myself",
    "tired of life",
    "quit life",
    "dead",
];

/// Result of mood analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Improving,
    Struggling,
    Neutral,
    Crisis,
}

impl Mood {
    /// Machine name, also stored as the user's recovery stage
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Improving => "improving",
            Mood::Struggling => "struggling",
            Mood::Neutral => "neutral",
            Mood::Crisis => "crisis",
        }
    }

    /// Label shown to the user. Crisis is softened to "Support Needed".
    pub fn display_label(&self) -> &'static str {
        match self {
            Mood::Crisis => "Support Needed",
            other => other.as_str(),
        }
    }

    /// Only clear trends move the recovery stage
    pub fn updates_recovery_stage(&self) -> bool {
        matches!(self, Mood::Improving | Mood::Struggling)
    }

    /// Context-aware next steps for this mood
    pub fn suggestions(&self) -> [&'static str; 3] {
        match self {
            Mood::Improving => [
                "Celebrate this win - write down 3 things you did well",
                "Share your positivity with a friend or in the community",
                "Set a new goal while you are feeling strong",
            ],
            Mood::Struggling => [
                "Be gentle with yourself, healing is non-linear",
                "Try the 5-minute box breathing exercise now",
                "Write a letter to yourself offering compassion",
            ],
            Mood::Neutral => [
                "Take a moment to identify one small joy today",
                "Go for a short walk to clear your mind",
                "Practice mindfulness for 5 minutes",
            ],
            Mood::Crisis => [
                "Please reach out for help immediately - you are not alone.",
                "Call Vandrevala Foundation (India): 1860-266-2345 (24/7)",
                "Call iCall Helpline: 9152987821 (Mon-Sat, 8 AM - 10 PM)",
            ],
        }
    }
}

/// Classify free text into a [`Mood`]
///
/// # Examples
///
/// ```
/// use horizons_common::mood::{analyze_mood, Mood};
///
/// assert_eq!(analyze_mood("I feel happy and calm today!"), Mood::Improving);
/// assert_eq!(analyze_mood("So lonely. I miss them."), Mood::Struggling);
/// assert_eq!(analyze_mood("There is no point anymore"), Mood::Crisis);
/// assert_eq!(analyze_mood("Went to work."), Mood::Neutral);
/// ```
pub fn analyze_mood(text: &str) -> Mood {
    let clean: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    let words: Vec<&str> = clean.split_whitespace().collect();

    if mentions_crisis(&words) {
        return Mood::Crisis;
    }

    let pos = words.iter().filter(|w| POSITIVE_WORDS.contains(*w)).count();
    let neg = words.iter().filter(|w| NEGATIVE_WORDS.contains(*w)).count();

    if pos > neg {
        Mood::Improving
    } else if neg > pos {
        Mood::Struggling
    } else {
        Mood::Neutral
    }
}

/// Substring match over the whitespace-normalized text
///
/// Inflections count: "kill" matches "killing", "end it" matches "ending it".
/// False positives such as "diet" are accepted on this path.
fn mentions_crisis(words: &[&str]) -> bool {
    let text = words.join(" ");
    CRISIS_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

/// Progress mood score recorded for a journal mood tag (1-10 scale)
pub fn journal_mood_score(mood_tag: &str) -> i64 {
    match mood_tag {
        "happy" => 8,
        "neutral" => 5,
        "sad" => 3,
        _ => 5,
    }
}
