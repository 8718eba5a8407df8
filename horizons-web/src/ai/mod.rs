//! AI persona layer
//!
//! - **Personas** (`persona`): the four guidance voices and their prompts
//! - **Client** (`client`): chat-completion backend trait and Groq implementation
//! - **Fallback** (`fallback`): pre-written replies used when the backend fails
//! - **Gate** (`gate`): process-wide rate-limit cooldown
//! - **Orchestrator** (`orchestrator`): concurrent persona calls with per-call fallback

pub mod client;
pub mod fallback;
pub mod gate;
pub mod orchestrator;
pub mod persona;

pub use client::{AiError, ChatBackend, GroqClient};
pub use gate::RateLimitGate;
pub use orchestrator::{Notice, PersonaReply, PlanOrchestrator, PlanOutcome, ReplySource};
pub use persona::{PlanDuration, Persona};
