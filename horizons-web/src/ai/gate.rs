//! Rate-limit cooldown gate
//!
//! Once the provider reports rate limiting, every plan request skips the
//! backend until the cooldown elapses. Shared by all requests in the process.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Process-wide "provider is rate-limited" flag with a reset instant
pub struct RateLimitGate {
    reset_at: Mutex<Option<Instant>>,
    cooldown: Duration,
}

impl RateLimitGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            reset_at: Mutex::new(None),
            cooldown,
        }
    }

    /// True while the cooldown is running; clears itself once it has passed
    pub async fn is_limited(&self) -> bool {
        let mut reset_at = self.reset_at.lock().await;
        match *reset_at {
            Some(reset) if Instant::now() < reset => true,
            Some(_) => {
                *reset_at = None;
                tracing::info!("Rate-limit cooldown elapsed; AI calls resume");
                false
            }
            None => false,
        }
    }

    /// Time left before calls resume
    pub async fn remaining(&self) -> Option<Duration> {
        let reset_at = self.reset_at.lock().await;
        reset_at
            .map(|reset| reset.saturating_duration_since(Instant::now()))
            .filter(|left| !left.is_zero())
    }

    /// Start (or restart) the cooldown from now
    pub async fn trip(&self) {
        let mut reset_at = self.reset_at.lock().await;
        *reset_at = Some(Instant::now() + self.cooldown);
        tracing::warn!(cooldown_secs = self.cooldown.as_secs(), "AI provider rate-limited; using fallback content");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_gate_starts_open() {
        let gate = RateLimitGate::new(Duration::from_secs(3600));
        assert!(!gate.is_limited().await);
        assert_eq!(gate.remaining().await, None);
    }

    #[tokio::test]
    async fn test_trip_limits_until_cooldown() {
        let gate = RateLimitGate::new(Duration::from_secs(3600));
        gate.trip().await;
        assert!(gate.is_limited().await);

        let left = gate.remaining().await.unwrap();
        assert!(left > Duration::from_secs(3590));
    }

    #[tokio::test]
    async fn test_gate_clears_itself() {
        let gate = RateLimitGate::new(Duration::from_millis(20));
        gate.trip().await;
        assert!(gate.is_limited().await);

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(!gate.is_limited().await);
        assert_eq!(gate.remaining().await, None);
    }

    #[tokio::test]
    async fn test_zero_cooldown_never_limits() {
        let gate = RateLimitGate::new(Duration::ZERO);
        gate.trip().await;
        assert!(!gate.is_limited().await);
    }
}
