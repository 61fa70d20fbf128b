//! Resend cooldown tracking.

use std::time::Duration;
use tokio::time::Instant;

/// Seconds an applicant must wait between resend requests on one channel.
pub const RESEND_COOLDOWN_SECS: u64 = 60;

/// A restartable countdown gating resend requests on one channel.
///
/// The countdown runs from the window (60 seconds by default) to zero and
/// only restarts when a resend is accepted; nothing else resets it. Built on
/// [`tokio::time::Instant`], so tests drive it with tokio's paused clock.
#[derive(Debug, Clone)]
pub struct ResendCooldown {
    window: Duration,
    deadline: Option<Instant>,
}

impl Default for ResendCooldown {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(RESEND_COOLDOWN_SECS),
            deadline: None,
        }
    }
}

impl ResendCooldown {
    /// Creates a cooldown with the default 60-second window, initially ready.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom window.
    #[must_use]
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// The configured window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Starts (or restarts) the countdown from the full window.
    pub fn begin(&mut self) {
        self.deadline = Some(Instant::now() + self.window);
    }

    /// Returns true if a resend would be accepted now.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.deadline
            .map_or(true, |deadline| Instant::now() >= deadline)
    }

    /// Time left until the next resend is accepted. Zero when ready.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or_default()
    }

    /// Whole seconds left, rounded up, as shown in the resend countdown.
    #[must_use]
    pub fn remaining_secs(&self) -> u64 {
        let remaining = self.remaining();
        if remaining.is_zero() {
            0
        } else {
            u64::from(remaining.subsec_nanos() > 0) + remaining.as_secs()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn test_cooldown_starts_ready() {
        let cooldown = ResendCooldown::new();
        assert!(cooldown.is_ready());
        assert_eq!(cooldown.remaining_secs(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cooldown_counts_down_to_zero() {
        let mut cooldown = ResendCooldown::new();
        cooldown.begin();
        assert!(!cooldown.is_ready());
        assert_eq!(cooldown.remaining_secs(), 60);

        advance(Duration::from_secs(25)).await;
        assert_eq!(cooldown.remaining_secs(), 35);

        advance(Duration::from_secs(35)).await;
        assert!(cooldown.is_ready());
        assert_eq!(cooldown.remaining_secs(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cooldown_restarts_from_full_window() {
        let mut cooldown = ResendCooldown::new();
        cooldown.begin();
        advance(Duration::from_secs(40)).await;
        assert_eq!(cooldown.remaining_secs(), 20);

        cooldown.begin();
        assert_eq!(cooldown.remaining_secs(), 60);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cooldown_rounds_partial_seconds_up() {
        let mut cooldown = ResendCooldown::new();
        cooldown.begin();
        advance(Duration::from_millis(59_500)).await;
        assert_eq!(cooldown.remaining_secs(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cooldown_custom_window() {
        let mut cooldown = ResendCooldown::new().with_window(Duration::from_secs(5));
        cooldown.begin();
        assert_eq!(cooldown.remaining_secs(), 5);

        advance(Duration::from_secs(5)).await;
        assert!(cooldown.is_ready());
    }
}
