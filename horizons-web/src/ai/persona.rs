//! Guidance personas
//!
//! Each persona is a system prompt for the chat backend. They are always
//! called (and displayed) in [`Persona::ALL`] order.

use serde::Serialize;
use std::fmt;

/// One of the four AI guidance voices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Therapist,
    Planner,
    Closure,
    Honesty,
}

impl Persona {
    /// Call and display order
    pub const ALL: [Persona; 4] = [
        Persona::Therapist,
        Persona::Planner,
        Persona::Closure,
        Persona::Honesty,
    ];

    /// Stable key used in logs and element ids
    pub fn key(&self) -> &'static str {
        match self {
            Persona::Therapist => "therapist",
            Persona::Planner => "planner",
            Persona::Closure => "closure",
            Persona::Honesty => "honesty",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Persona::Therapist => "Empathetic Therapist",
            Persona::Planner => "Recovery Planner",
            Persona::Closure => "Closure Specialist",
            Persona::Honesty => "Brutal Honesty Coach",
        }
    }

    /// Section heading on the results page
    pub fn heading(&self) -> &'static str {
        match self {
            Persona::Therapist => "Emotional Support",
            Persona::Planner => "Your Recovery Plan",
            Persona::Closure => "Finding Closure",
            Persona::Honesty => "Reality Check",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Persona::Therapist => "💜",
            Persona::Planner => "📅",
            Persona::Closure => "🕊️",
            Persona::Honesty => "💪",
        }
    }

    pub fn instructions(&self) -> &'static [&'static str] {
        match self {
            Persona::Therapist => &[
                "You are Dr. Ananya Sharma, a licensed therapist specializing in relationship recovery.",
                "Use a warm, supportive tone with Indian cultural context.",
                "Provide evidence-based strategies from positive psychology and mindfulness.",
                "Structure response with: Brief Validation → Coping Strategies → Actionable Steps",
                "Include culturally relevant examples and metaphors.",
                "Format with clear headings, bullet points, and emojis for readability.",
            ],
            Persona::Planner => &[
                "Create personalized 14-day recovery plans for Indian users.",
                "Include daily activities: Yoga/meditation, social connections, self-care.",
                "Suggest local resources: Support groups, helplines, therapists in India.",
                "Incorporate Indian cultural activities and festivals.",
                "Add progress tracking and celebration milestones.",
            ],
            Persona::Closure => &[
                "You help write therapeutic closure messages for Indian context.",
                "Focus on: Unsent letters, forgiveness exercises, ritual suggestions.",
                "Include elements of mindfulness and letting go practices.",
                "Suggest cultural rituals like 'writing and burning' or 'river release'.",
                "Provide step-by-step emotional release exercises.",
            ],
            Persona::Honesty => &[
                "Give direct, no-filter advice with tough love approach.",
                "Use Indian idioms and colloquial language appropriately.",
                "Focus on reality checks and practical solutions.",
                "Balance harsh truths with motivational push.",
                "Include 'wake-up call' moments and empowerment messages.",
            ],
        }
    }

    /// System message: persona name, instruction list, markdown request
    pub fn system_prompt(&self) -> String {
        let mut prompt = format!("You are the {}.\n\n", self.name());
        for line in self.instructions() {
            prompt.push_str("- ");
            prompt.push_str(line);
            prompt.push('\n');
        }
        prompt.push_str("\nFormat your entire response in Markdown.");
        prompt
    }

    /// User message for this persona
    pub fn prompt(&self, situation: &str, plan: PlanDuration) -> String {
        match self {
            Persona::Planner => format!("Create a {} recovery plan for: {}", plan, situation),
            _ => format!("Situation: {}", situation),
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Length of the requested recovery plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PlanDuration {
    #[default]
    #[serde(rename = "7day")]
    SevenDay,
    #[serde(rename = "14day")]
    FourteenDay,
    #[serde(rename = "30day")]
    ThirtyDay,
}

impl PlanDuration {
    pub const ALL: [PlanDuration; 3] = [
        PlanDuration::SevenDay,
        PlanDuration::FourteenDay,
        PlanDuration::ThirtyDay,
    ];

    /// Form value (`7day`, `14day`, `30day`)
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanDuration::SevenDay => "7day",
            PlanDuration::FourteenDay => "14day",
            PlanDuration::ThirtyDay => "30day",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlanDuration::SevenDay => "7-Day Quick Start",
            PlanDuration::FourteenDay => "14-Day Deep Healing",
            PlanDuration::ThirtyDay => "30-Day Transformation",
        }
    }

    /// Parse a form value; anything unrecognized means the 7-day plan
    pub fn from_form(value: &str) -> Self {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == value)
            .unwrap_or_default()
    }
}

impl fmt::Display for PlanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts() {
        assert_eq!(
            Persona::Therapist.prompt("We broke up", PlanDuration::SevenDay),
            "Situation: We broke up"
        );
        assert_eq!(
            Persona::Planner.prompt("We broke up", PlanDuration::FourteenDay),
            "Create a 14day recovery plan for: We broke up"
        );
        assert_eq!(
            Persona::Honesty.prompt("x", PlanDuration::ThirtyDay),
            "Situation: x"
        );
    }

    #[test]
    fn test_system_prompt_lists_instructions() {
        let prompt = Persona::Therapist.system_prompt();
        assert!(prompt.starts_with("You are the Empathetic Therapist."));
        assert!(prompt.contains("- You are Dr. Ananya Sharma"));
        assert!(prompt.ends_with("Markdown."));
    }

    #[test]
    fn test_call_order() {
        let keys: Vec<_> = Persona::ALL.iter().map(|p| p.key()).collect();
        assert_eq!(keys, vec!["therapist", "planner", "closure", "honesty"]);
    }

    #[test]
    fn test_plan_duration_from_form() {
        assert_eq!(PlanDuration::from_form("14day"), PlanDuration::FourteenDay);
        assert_eq!(PlanDuration::from_form(" 30DAY "), PlanDuration::ThirtyDay);
        assert_eq!(PlanDuration::from_form(""), PlanDuration::SevenDay);
        assert_eq!(PlanDuration::from_form("365day"), PlanDuration::SevenDay);
    }
}
