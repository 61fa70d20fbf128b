//! The code verifier contract and its simulated implementation.

use crate::validate::is_six_digit_code;
use crate::verify::{Channel, ResendCooldown, RESEND_COOLDOWN_SECS};
use async_trait::async_trait;
use dashmap::DashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Outcome of submitting an entered code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyOutcome {
    /// The code was accepted; the channel is proven.
    Verified,
    /// The code was not accepted.
    Rejected,
}

impl VerifyOutcome {
    /// Returns true if the channel was verified.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

/// Errors from the verification contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// A resend was requested while the channel's cooldown is still running.
    #[error("Resend for {channel} is cooling down; ready in {remaining_secs}s")]
    CooldownActive {
        /// The channel that refused the resend.
        channel: Channel,
        /// Whole seconds until the channel accepts another request.
        remaining_secs: u64,
    },

    /// A second operation was started on a channel that already has one
    /// running.
    #[error("A verification for {channel} is already in flight")]
    AlreadyInFlight {
        /// The busy channel.
        channel: Channel,
    },
}

/// Contract for issuing and checking verification codes.
///
/// Implementations deliver codes out of band (email, SMS) and check
/// submissions against what was delivered. Each channel carries its own
/// resend cooldown.
#[async_trait]
pub trait CodeVerifier: Send + Sync {
    /// Issues a fresh code for the channel and starts (or restarts) its
    /// resend cooldown.
    ///
    /// Refused with [`VerifyError::CooldownActive`] while the countdown is
    /// running.
    async fn request_code(&self, channel: Channel) -> Result<(), VerifyError>;

    /// Checks an entered code for the channel.
    ///
    /// Malformed codes are rejected without a provider round trip.
    async fn submit_code(&self, channel: Channel, code: &str) -> Result<VerifyOutcome, VerifyError>;

    /// Whole seconds until the channel accepts another resend request.
    /// Zero when ready.
    fn cooldown_remaining(&self, channel: Channel) -> u64;
}

/// A development stand-in for a real verification provider.
///
/// Simulates the provider round trip with a fixed latency and issues random
/// six-digit codes, logging them at debug level instead of delivering them.
/// Any well-formed six-digit code is accepted, whether or not one was
/// requested; a production [`CodeVerifier`] must deliver codes out of band
/// and match submissions server side.
#[derive(Debug)]
pub struct SimulatedVerifier {
    latency: Duration,
    cooldown_window: Duration,
    cooldowns: DashMap<Channel, ResendCooldown>,
    issued: DashMap<Channel, String>,
}

impl Default for SimulatedVerifier {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(1500),
            cooldown_window: Duration::from_secs(RESEND_COOLDOWN_SECS),
            cooldowns: DashMap::new(),
            issued: DashMap::new(),
        }
    }
}

impl SimulatedVerifier {
    /// Creates a verifier with the default round-trip latency (1.5 s) and
    /// resend window (60 s).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the simulated provider round-trip latency.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Sets the resend cooldown window.
    #[must_use]
    pub fn with_cooldown_window(mut self, window: Duration) -> Self {
        self.cooldown_window = window;
        self
    }

    /// The most recently issued code for a channel, if any.
    #[must_use]
    pub fn issued_code(&self, channel: Channel) -> Option<String> {
        self.issued.get(&channel).map(|code| code.clone())
    }

    fn fresh_code() -> String {
        let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
        format!("{n:06}")
    }
}

#[async_trait]
impl CodeVerifier for SimulatedVerifier {
    async fn request_code(&self, channel: Channel) -> Result<(), VerifyError> {
        let mut cooldown = self
            .cooldowns
            .entry(channel)
            .or_insert_with(|| ResendCooldown::new().with_window(self.cooldown_window));

        if !cooldown.is_ready() {
            return Err(VerifyError::CooldownActive {
                channel,
                remaining_secs: cooldown.remaining_secs(),
            });
        }

        let code = Self::fresh_code();
        debug!(code = %code, "Issued {} verification code", channel);
        cooldown.begin();
        drop(cooldown);
        self.issued.insert(channel, code);
        Ok(())
    }

    async fn submit_code(&self, channel: Channel, code: &str) -> Result<VerifyOutcome, VerifyError> {
        if !is_six_digit_code(code) {
            debug!("Rejected malformed {} code without round trip", channel);
            return Ok(VerifyOutcome::Rejected);
        }

        tokio::time::sleep(self.latency).await;
        debug!("Accepted {} verification code", channel);
        Ok(VerifyOutcome::Verified)
    }

    fn cooldown_remaining(&self, channel: Channel) -> u64 {
        self.cooldowns
            .get(&channel)
            .map_or(0, |cooldown| cooldown.remaining_secs())
    }
}
