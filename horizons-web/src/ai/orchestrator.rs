//! Plan generation across the four personas
//!
//! All four personas are asked concurrently, each under its own timeout.
//! Any persona whose call fails, times out, returns an error payload or
//! returns nothing gets its pre-written fallback instead. Rate-limit shaped
//! failures trip the [`RateLimitGate`] so later requests skip the provider
//! entirely until the cooldown passes.

use futures::future::join_all;
use horizons_common::failure::{classify_failure, extract_error_message, sniff_error_payload};
use horizons_common::FailureKind;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::client::ChatBackend;
use super::fallback::fallback_reply;
use super::gate::RateLimitGate;
use super::persona::{PlanDuration, Persona};

/// Where a reply's text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonaReply {
    pub persona: Persona,
    /// Markdown
    pub content: String,
    pub source: ReplySource,
}

impl PersonaReply {
    fn fallback(persona: Persona, plan: PlanDuration) -> Self {
        Self {
            persona,
            content: fallback_reply(persona, plan),
            source: ReplySource::Fallback,
        }
    }
}

/// User-facing notice explaining why fallback content is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// Gate is closed, or some personas fell back
    Capacity,
    /// Backend refused up front with a rate-limit error
    DailyLimit,
    /// Backend unusable for another reason
    Unavailable,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Capacity => {
                "⚠️ AI service is temporarily at capacity. Showing expertly crafted recovery guidance."
            }
            Notice::DailyLimit => {
                "⚠️ AI service has reached daily limit. Showing expertly crafted recovery guidance."
            }
            Notice::Unavailable => {
                "⚠️ Showing expertly crafted recovery guidance (AI connection unavailable)."
            }
        }
    }

    /// Only the daily-limit notice is a warning; the others are informational
    pub fn is_warning(&self) -> bool {
        matches!(self, Notice::DailyLimit)
    }
}

/// Result of one plan request
#[derive(Debug, Clone, Serialize)]
pub struct PlanOutcome {
    /// One reply per persona, in [`Persona::ALL`] order
    pub replies: Vec<PersonaReply>,
    pub notice: Option<Notice>,
    pub plan: PlanDuration,
}

impl PlanOutcome {
    fn all_fallback(plan: PlanDuration, notice: Notice) -> Self {
        Self {
            replies: Persona::ALL
                .iter()
                .map(|&p| PersonaReply::fallback(p, plan))
                .collect(),
            notice: Some(notice),
            plan,
        }
    }

    pub fn reply(&self, persona: Persona) -> Option<&PersonaReply> {
        self.replies.iter().find(|r| r.persona == persona)
    }

    pub fn fallback_count(&self) -> usize {
        self.replies
            .iter()
            .filter(|r| r.source == ReplySource::Fallback)
            .count()
    }
}

/// How a single persona call ended
enum CallOutcome {
    Content(String),
    /// Provider answered with an error object instead of content
    ErrorPayload(String),
    Failed(FailureKind, String),
}

/// Runs the persona calls for a plan request
pub struct PlanOrchestrator {
    backend: Arc<dyn ChatBackend>,
    gate: RateLimitGate,
    call_timeout: Duration,
}

impl PlanOrchestrator {
    pub fn new(backend: Arc<dyn ChatBackend>, call_timeout: Duration, cooldown: Duration) -> Self {
        Self {
            backend,
            gate: RateLimitGate::new(cooldown),
            call_timeout,
        }
    }

    pub fn gate(&self) -> &RateLimitGate {
        &self.gate
    }

    /// Produce all four replies for `situation`
    pub async fn generate(&self, situation: &str, plan: PlanDuration) -> PlanOutcome {
        if self.gate.is_limited().await {
            info!("Rate-limit cooldown active; skipping AI calls");
            return PlanOutcome::all_fallback(plan, Notice::Capacity);
        }

        if let Err(e) = self.backend.ensure_ready().await {
            let message = extract_error_message(&e.to_string());
            let notice = if classify_failure(&message) == FailureKind::RateLimited {
                self.gate.trip().await;
                Notice::DailyLimit
            } else {
                Notice::Unavailable
            };
            warn!(error = %message, ?notice, "AI backend not ready; using fallback content");
            return PlanOutcome::all_fallback(plan, notice);
        }

        let calls = Persona::ALL.iter().map(|&persona| {
            let prompt = persona.prompt(situation, plan);
            async move { (persona, self.call(persona, &prompt).await) }
        });
        let results = join_all(calls).await;

        let mut replies = Vec::with_capacity(results.len());
        for (persona, outcome) in results {
            let reply = match outcome {
                CallOutcome::Content(content) if !content.trim().is_empty() => PersonaReply {
                    persona,
                    content,
                    source: ReplySource::Ai,
                },
                CallOutcome::Content(_) => {
                    info!(persona = %persona, "Empty AI reply; using fallback");
                    PersonaReply::fallback(persona, plan)
                }
                CallOutcome::ErrorPayload(message) => {
                    warn!(persona = %persona, error = %message, "AI returned an error payload");
                    self.gate.trip().await;
                    PersonaReply::fallback(persona, plan)
                }
                CallOutcome::Failed(kind, message) => {
                    warn!(persona = %persona, ?kind, error = %message, "AI call failed; using fallback");
                    if kind == FailureKind::RateLimited {
                        self.gate.trip().await;
                    }
                    PersonaReply::fallback(persona, plan)
                }
            };
            replies.push(reply);
        }

        let used_fallback = replies.iter().any(|r| r.source == ReplySource::Fallback);

        PlanOutcome {
            replies,
            notice: used_fallback.then_some(Notice::Capacity),
            plan,
        }
    }

    async fn call(&self, persona: Persona, prompt: &str) -> CallOutcome {
        match tokio::time::timeout(self.call_timeout, self.backend.complete(persona, prompt)).await {
            Err(_) => CallOutcome::Failed(FailureKind::Timeout, "timeout".to_string()),
            Ok(Ok(content)) => match sniff_error_payload(&content) {
                Some(message) => CallOutcome::ErrorPayload(message),
                None => CallOutcome::Content(content),
            },
            Ok(Err(e)) => {
                let message = extract_error_message(&e.to_string());
                CallOutcome::Failed(classify_failure(&message), message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::client::AiError;
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// What the scripted backend does for one persona
    #[derive(Clone)]
    enum Script {
        Reply(&'static str),
        Fail(&'static str),
        Hang,
    }

    struct ScriptedBackend {
        ready: Result<(), &'static str>,
        scripts: HashMap<Persona, Script>,
        calls: AtomicUsize,
    }

    impl ScriptedBackend {
        fn new(default: Script) -> Self {
            Self {
                ready: Ok(()),
                scripts: Persona::ALL.iter().map(|&p| (p, default.clone())).collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn with(mut self, persona: Persona, script: Script) -> Self {
            self.scripts.insert(persona, script);
            self
        }

        fn not_ready(mut self, message: &'static str) -> Self {
            self.ready = Err(message);
            self
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn ensure_ready(&self) -> Result<(), AiError> {
            self.ready.map_err(|m| AiError::Unavailable(m.to_string()))
        }

        async fn complete(&self, persona: Persona, _prompt: &str) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.scripts[&persona] {
                Script::Reply(text) => Ok(text.to_string()),
                Script::Fail(body) => Err(AiError::Api(429, body.to_string())),
                Script::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok("too late".to_string())
                }
            }
        }
    }

    fn orchestrator(backend: Arc<ScriptedBackend>) -> PlanOrchestrator {
        PlanOrchestrator::new(backend, Duration::from_millis(100), Duration::from_secs(3600))
    }

    fn sources(outcome: &PlanOutcome) -> Vec<ReplySource> {
        outcome.replies.iter().map(|r| r.source).collect()
    }

    #[tokio::test]
    async fn test_all_ai_replies() {
        let backend = Arc::new(ScriptedBackend::new(Script::Reply("## You will heal")));
        let planner = orchestrator(backend.clone());

        let outcome = planner.generate("We broke up", PlanDuration::SevenDay).await;

        assert_eq!(outcome.notice, None);
        assert_eq!(sources(&outcome), vec![ReplySource::Ai; 4]);
        assert_eq!(outcome.replies[0].content, "## You will heal");
        let order: Vec<_> = outcome.replies.iter().map(|r| r.persona).collect();
        assert_eq!(order, Persona::ALL.to_vec());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_rate_limited_call_trips_gate() {
        let backend = Arc::new(
            ScriptedBackend::new(Script::Reply("AI text")).with(
                Persona::Closure,
                Script::Fail(r#"{"error":{"message":"Rate limit reached for tokens per day (TPD)"}}"#),
            ),
        );
        let planner = orchestrator(backend.clone());

        let outcome = planner.generate("x", PlanDuration::FourteenDay).await;

        assert_eq!(outcome.notice, Some(Notice::Capacity));
        assert_eq!(
            sources(&outcome),
            vec![ReplySource::Ai, ReplySource::Ai, ReplySource::Fallback, ReplySource::Ai]
        );
        assert!(planner.gate().is_limited().await);

        // Next request never reaches the backend
        let second = planner.generate("y", PlanDuration::FourteenDay).await;
        assert_eq!(second.notice, Some(Notice::Capacity));
        assert_eq!(second.fallback_count(), 4);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 4);
        assert!(second
            .reply(Persona::Planner)
            .unwrap()
            .content
            .contains("14DAY"));
    }

    #[tokio::test]
    async fn test_timeout_falls_back_without_tripping() {
        let backend = Arc::new(
            ScriptedBackend::new(Script::Reply("AI text")).with(Persona::Therapist, Script::Hang),
        );
        let planner = orchestrator(backend);

        let outcome = planner.generate("x", PlanDuration::SevenDay).await;

        assert_eq!(outcome.reply(Persona::Therapist).unwrap().source, ReplySource::Fallback);
        assert_eq!(outcome.fallback_count(), 1);
        assert_eq!(outcome.notice, Some(Notice::Capacity));
        assert!(!planner.gate().is_limited().await);
    }

    #[tokio::test]
    async fn test_error_payload_content_trips_gate() {
        let backend = Arc::new(ScriptedBackend::new(Script::Reply("AI text")).with(
            Persona::Honesty,
            Script::Reply(r#"{"error": {"message": "Service overloaded"}}"#),
        ));
        let planner = orchestrator(backend);

        let outcome = planner.generate("x", PlanDuration::SevenDay).await;

        assert_eq!(outcome.reply(Persona::Honesty).unwrap().source, ReplySource::Fallback);
        assert!(planner.gate().is_limited().await);
    }

    #[tokio::test]
    async fn test_empty_content_falls_back() {
        let backend = Arc::new(
            ScriptedBackend::new(Script::Reply("AI text")).with(Persona::Planner, Script::Reply("  \n")),
        );
        let planner = orchestrator(backend);

        let outcome = planner.generate("x", PlanDuration::SevenDay).await;

        assert_eq!(outcome.reply(Persona::Planner).unwrap().source, ReplySource::Fallback);
        assert_eq!(outcome.notice, Some(Notice::Capacity));
        assert!(!planner.gate().is_limited().await);
    }

    #[tokio::test]
    async fn test_json_inside_markdown_is_content() {
        let text = "Try this:\n```json\n{\"error\": \"none\"}\n```";
        let backend = Arc::new(ScriptedBackend::new(Script::Reply(text)));
        let planner = orchestrator(backend);

        let outcome = planner.generate("x", PlanDuration::SevenDay).await;
        assert_eq!(outcome.fallback_count(), 0);
    }

    #[tokio::test]
    async fn test_not_ready_with_rate_limit_error() {
        let backend = Arc::new(
            ScriptedBackend::new(Script::Reply("AI text")).not_ready("quota exceeded for today"),
        );
        let planner = orchestrator(backend.clone());

        let outcome = planner.generate("x", PlanDuration::SevenDay).await;

        assert_eq!(outcome.notice, Some(Notice::DailyLimit));
        assert!(outcome.notice.unwrap().is_warning());
        assert_eq!(outcome.fallback_count(), 4);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
        assert!(planner.gate().is_limited().await);
    }

    #[tokio::test]
    async fn test_not_ready_other_error() {
        let backend = Arc::new(
            ScriptedBackend::new(Script::Reply("AI text")).not_ready("connection refused"),
        );
        let planner = orchestrator(backend);

        let outcome = planner.generate("x", PlanDuration::SevenDay).await;

        assert_eq!(outcome.notice, Some(Notice::Unavailable));
        assert!(!outcome.notice.unwrap().is_warning());
        assert!(!planner.gate().is_limited().await);
    }

    #[tokio::test]
    async fn test_persona_calls_run_concurrently() {
        let backend = Arc::new(ScriptedBackend::new(Script::Hang));
        let planner = orchestrator(backend.clone());

        let started = std::time::Instant::now();
        let outcome = planner.generate("x", PlanDuration::SevenDay).await;
        let elapsed = started.elapsed();

        // Four sequential 100 ms timeouts would take at least 400 ms
        assert!(elapsed < Duration::from_millis(300), "took {:?}", elapsed);
        assert_eq!(outcome.fallback_count(), 4);
        assert_eq!(outcome.notice, Some(Notice::Capacity));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 4);
        assert!(!planner.gate().is_limited().await);
    }
}
