//! Wizard step and lifecycle phase enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four sequential steps of the salon registration wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Salon identity, contact details, and credentials.
    BasicInfo,
    /// Street address and offered service categories.
    LocationServices,
    /// Email and phone ownership confirmation.
    Verification,
    /// Terms agreement and final submission.
    ReviewSubmit,
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::BasicInfo
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BasicInfo => write!(f, "basic_info"),
            Self::LocationServices => write!(f, "location_services"),
            Self::Verification => write!(f, "verification"),
            Self::ReviewSubmit => write!(f, "review_submit"),
        }
    }
}

impl WizardStep {
    /// All steps in wizard order.
    pub const ALL: [Self; 4] = [
        Self::BasicInfo,
        Self::LocationServices,
        Self::Verification,
        Self::ReviewSubmit,
    ];

    /// The 1-based position shown in the step indicator.
    #[must_use]
    pub fn index(&self) -> u8 {
        match self {
            Self::BasicInfo => 1,
            Self::LocationServices => 2,
            Self::Verification => 3,
            Self::ReviewSubmit => 4,
        }
    }

    /// Looks up a step by its 1-based index.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::BasicInfo),
            2 => Some(Self::LocationServices),
            3 => Some(Self::Verification),
            4 => Some(Self::ReviewSubmit),
            _ => None,
        }
    }

    /// Short heading shown for the step.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Information",
            Self::LocationServices => "Location & Services",
            Self::Verification => "Verification",
            Self::ReviewSubmit => "Review & Submit",
        }
    }

    /// One-line description shown under the heading.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::BasicInfo => "Tell us about your salon",
            Self::LocationServices => "Where are you and what do you offer?",
            Self::Verification => "Verify your contact information",
            Self::ReviewSubmit => "Final step before approval",
        }
    }

    /// Progress through the wizard as a percentage, 0.0 at the first step
    /// and 100.0 at the last.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        let span = Self::ALL.len() - 1;
        f64::from(self.index() - 1) / span as f64 * 100.0
    }

    /// The step after this one, if any.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The step before this one, if any.
    #[must_use]
    pub fn prev(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Returns true if this is the first step.
    #[must_use]
    pub fn is_first(&self) -> bool {
        *self == Self::BasicInfo
    }

    /// Returns true if this is the final step.
    #[must_use]
    pub fn is_final(&self) -> bool {
        *self == Self::ReviewSubmit
    }
}

/// The lifecycle of a wizard run, orthogonal to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardPhase {
    /// The applicant is still filling in steps.
    InProgress,
    /// A submission has been handed to the gateway and has not resolved.
    Submitting,
    /// The gateway accepted the registration. No further transitions.
    Submitted,
}

impl Default for WizardPhase {
    fn default() -> Self {
        Self::InProgress
    }
}

impl fmt::Display for WizardPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "in_progress"),
            Self::Submitting => write!(f, "submitting"),
            Self::Submitted => write!(f, "submitted"),
        }
    }
}

impl WizardPhase {
    /// Returns true if the phase admits no further transitions.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert_eq!(WizardStep::BasicInfo.next(), Some(WizardStep::LocationServices));
        assert_eq!(WizardStep::LocationServices.next(), Some(WizardStep::Verification));
        assert_eq!(WizardStep::Verification.next(), Some(WizardStep::ReviewSubmit));
        assert_eq!(WizardStep::ReviewSubmit.next(), None);

        assert_eq!(WizardStep::BasicInfo.prev(), None);
        assert_eq!(WizardStep::ReviewSubmit.prev(), Some(WizardStep::Verification));
    }

    #[test]
    fn test_step_index_round_trip() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_index(step.index()), Some(step));
        }
        assert_eq!(WizardStep::from_index(0), None);
        assert_eq!(WizardStep::from_index(5), None);
    }

    #[test]
    fn test_step_metadata() {
        assert_eq!(WizardStep::BasicInfo.title(), "Basic Information");
        assert_eq!(WizardStep::BasicInfo.description(), "Tell us about your salon");
        assert_eq!(WizardStep::LocationServices.title(), "Location & Services");
        assert_eq!(WizardStep::Verification.description(), "Verify your contact information");
        assert_eq!(WizardStep::ReviewSubmit.title(), "Review & Submit");
    }

    #[test]
    fn test_step_progress() {
        assert!((WizardStep::BasicInfo.progress_percent() - 0.0).abs() < f64::EPSILON);
        assert!((WizardStep::ReviewSubmit.progress_percent() - 100.0).abs() < f64::EPSILON);
        let second = WizardStep::LocationServices.progress_percent();
        assert!(second > 33.0 && second < 34.0);
    }

    #[test]
    fn test_phase_terminal() {
        assert!(WizardPhase::Submitted.is_terminal());
        assert!(!WizardPhase::InProgress.is_terminal());
        assert!(!WizardPhase::Submitting.is_terminal());
    }

    #[test]
    fn test_step_serialize() {
        let json = serde_json::to_string(&WizardStep::LocationServices).unwrap();
        assert_eq!(json, r#""location_services""#);

        let parsed: WizardStep = serde_json::from_str(r#""review_submit""#).unwrap();
        assert_eq!(parsed, WizardStep::ReviewSubmit);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(WizardPhase::InProgress.to_string(), "in_progress");
        assert_eq!(WizardPhase::Submitting.to_string(), "submitting");
        assert_eq!(WizardPhase::Submitted.to_string(), "submitted");
    }
}
