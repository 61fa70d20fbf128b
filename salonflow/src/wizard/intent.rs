//! Typed intents the host sends to the controller.

use crate::core::{
    BasicInfoPatch, LocationServicesPatch, ReviewPatch, ServiceCategory, VerificationPatch,
    WizardStep,
};
use serde::{Deserialize, Serialize};

/// A state mutation or navigation request.
///
/// Intents are the only way to change wizard state. Field edits carry a
/// patch for the step's record; navigation intents move between steps and
/// are refused when the move is not allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardIntent {
    /// Patch the basic-info record.
    UpdateBasicInfo(BasicInfoPatch),
    /// Patch the location-and-services record.
    UpdateLocationServices(LocationServicesPatch),
    /// Add or remove one service category.
    ToggleCategory(ServiceCategory),
    /// Patch the entered verification codes.
    UpdateVerification(VerificationPatch),
    /// Patch the review agreements.
    UpdateReview(ReviewPatch),
    /// Move to the next step if the current one validates.
    Advance,
    /// Move to the previous step.
    Back,
    /// Jump to the given step; only the current or an earlier step is
    /// reachable.
    JumpTo(WizardStep),
}

impl WizardIntent {
    /// Short name of the intent, for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpdateBasicInfo(_) => "update_basic_info",
            Self::UpdateLocationServices(_) => "update_location_services",
            Self::ToggleCategory(_) => "toggle_category",
            Self::UpdateVerification(_) => "update_verification",
            Self::UpdateReview(_) => "update_review",
            Self::Advance => "advance",
            Self::Back => "back",
            Self::JumpTo(_) => "jump_to",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_kind() {
        assert_eq!(WizardIntent::Advance.kind(), "advance");
        assert_eq!(
            WizardIntent::JumpTo(WizardStep::BasicInfo).kind(),
            "jump_to"
        );
        assert_eq!(
            WizardIntent::ToggleCategory(ServiceCategory::Hair).kind(),
            "toggle_category"
        );
    }

    #[test]
    fn test_intent_serialize() {
        let json = serde_json::to_string(&WizardIntent::Advance).unwrap();
        assert_eq!(json, r#""advance""#);

        let intent = WizardIntent::JumpTo(WizardStep::BasicInfo);
        let json = serde_json::to_string(&intent).unwrap();
        let parsed: WizardIntent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, intent);
    }
}
