//! Wizard lifecycle event type.

use crate::core::WizardStep;
use crate::verify::Channel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An event emitted by the wizard controller.
///
/// Events carry field names and identifiers, never entered values, so a
/// sink can be wired to analytics without leaking applicant data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardEvent {
    /// The event kind (e.g., "wizard.step_advanced").
    #[serde(rename = "type")]
    pub kind: String,

    /// When the event occurred (ISO 8601).
    pub timestamp: String,

    /// The event payload data.
    #[serde(default)]
    pub data: HashMap<String, serde_json::Value>,
}

impl WizardEvent {
    /// Creates a new event of the given kind.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            timestamp: crate::utils::iso_timestamp(),
            data: HashMap::new(),
        }
    }

    /// Adds a data field to the event.
    #[must_use]
    pub fn add_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Creates a "wizard.step_advanced" event.
    #[must_use]
    pub fn step_advanced(from: WizardStep, to: WizardStep) -> Self {
        Self::new("wizard.step_advanced")
            .add_data("from", serde_json::json!(from))
            .add_data("to", serde_json::json!(to))
    }

    /// Creates a "wizard.stepped_back" event.
    #[must_use]
    pub fn stepped_back(from: WizardStep, to: WizardStep) -> Self {
        Self::new("wizard.stepped_back")
            .add_data("from", serde_json::json!(from))
            .add_data("to", serde_json::json!(to))
    }

    /// Creates a "wizard.jumped" event.
    #[must_use]
    pub fn jumped(from: WizardStep, to: WizardStep) -> Self {
        Self::new("wizard.jumped")
            .add_data("from", serde_json::json!(from))
            .add_data("to", serde_json::json!(to))
    }

    /// Creates a "wizard.step_blocked" event listing the invalid fields.
    #[must_use]
    pub fn step_blocked(step: WizardStep, fields: &[String]) -> Self {
        Self::new("wizard.step_blocked")
            .add_data("step", serde_json::json!(step))
            .add_data("fields", serde_json::json!(fields))
    }

    /// Creates a "wizard.verification_incomplete" event.
    #[must_use]
    pub fn verification_incomplete(email_verified: bool, phone_verified: bool) -> Self {
        Self::new("wizard.verification_incomplete")
            .add_data("email_verified", serde_json::json!(email_verified))
            .add_data("phone_verified", serde_json::json!(phone_verified))
    }

    /// Creates a "verify.code_requested" event.
    #[must_use]
    pub fn code_requested(channel: Channel) -> Self {
        Self::new("verify.code_requested").add_data("channel", serde_json::json!(channel))
    }

    /// Creates a "verify.code_rejected" event.
    #[must_use]
    pub fn code_rejected(channel: Channel) -> Self {
        Self::new("verify.code_rejected").add_data("channel", serde_json::json!(channel))
    }

    /// Creates a "verify.channel_verified" event.
    #[must_use]
    pub fn channel_verified(channel: Channel) -> Self {
        Self::new("verify.channel_verified").add_data("channel", serde_json::json!(channel))
    }

    /// Creates a "wizard.submitting" event.
    #[must_use]
    pub fn submitting() -> Self {
        Self::new("wizard.submitting")
    }

    /// Creates a "wizard.submitted" event.
    #[must_use]
    pub fn submitted(registration_id: &str) -> Self {
        Self::new("wizard.submitted")
            .add_data("registration_id", serde_json::json!(registration_id))
    }

    /// Creates a "wizard.submit_failed" event.
    #[must_use]
    pub fn submit_failed(error: &str) -> Self {
        Self::new("wizard.submit_failed").add_data("error", serde_json::json!(error))
    }

    /// Creates a "wizard.cancelled" event.
    #[must_use]
    pub fn cancelled(reason: &str) -> Self {
        Self::new("wizard.cancelled").add_data("reason", serde_json::json!(reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = WizardEvent::new("wizard.test");
        assert_eq!(event.kind, "wizard.test");
        assert!(event.data.is_empty());
        assert!(event.timestamp.contains('T'));
    }

    #[test]
    fn test_step_advanced_event() {
        let event = WizardEvent::step_advanced(WizardStep::BasicInfo, WizardStep::LocationServices);
        assert_eq!(event.kind, "wizard.step_advanced");
        assert_eq!(event.data.get("from"), Some(&serde_json::json!("basic_info")));
        assert_eq!(
            event.data.get("to"),
            Some(&serde_json::json!("location_services"))
        );
    }

    #[test]
    fn test_step_blocked_event_carries_field_names_only() {
        let fields = vec!["email".to_string(), "password".to_string()];
        let event = WizardEvent::step_blocked(WizardStep::BasicInfo, &fields);
        assert_eq!(
            event.data.get("fields"),
            Some(&serde_json::json!(["email", "password"]))
        );
    }

    #[test]
    fn test_channel_verified_event() {
        let event = WizardEvent::channel_verified(Channel::Phone);
        assert_eq!(event.kind, "verify.channel_verified");
        assert_eq!(event.data.get("channel"), Some(&serde_json::json!("phone")));
    }

    #[test]
    fn test_event_serialization() {
        let event = WizardEvent::submitted("reg-123");
        let json = serde_json::to_string(&event).unwrap();
        let parsed: WizardEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.kind, "wizard.submitted");
        assert_eq!(
            parsed.data.get("registration_id"),
            Some(&serde_json::json!("reg-123"))
        );
    }
}
