//! Contact verification: channels, resend cooldowns, and the code verifier
//! contract with its simulated implementation.

mod cooldown;
mod simulator;

pub use cooldown::{ResendCooldown, RESEND_COOLDOWN_SECS};
pub use simulator::{CodeVerifier, SimulatedVerifier, VerifyError, VerifyOutcome};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A contact channel the applicant must prove ownership of.
///
/// Channels are fully independent: each has its own entered code, verified
/// flag, resend cooldown, and in-flight guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// The email address from the basic-info step.
    Email,
    /// The phone number from the basic-info step.
    Phone,
}

impl Channel {
    /// Both channels, email first.
    pub const ALL: [Self; 2] = [Self::Email, Self::Phone];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Phone => write!(f, "phone"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::Email.to_string(), "email");
        assert_eq!(Channel::Phone.to_string(), "phone");
    }

    #[test]
    fn test_channel_serialize() {
        let json = serde_json::to_string(&Channel::Phone).unwrap();
        assert_eq!(json, r#""phone""#);
    }
}
