//! The full wizard state snapshot.

use crate::core::{
    BasicInfoRecord, LocationServicesRecord, RegistrationPayload, ReviewRecord, VerificationRecord,
    WizardPhase, WizardStep,
};
use crate::validate::{
    validate_basic_info, validate_location_services, validate_review, validate_verification,
    FieldErrors,
};
use serde::{Deserialize, Serialize};

/// Everything the wizard knows: the current step, the lifecycle phase, and
/// the four step records.
///
/// The controller owns one of these behind a lock; [`snapshot`] hands out
/// clones so hosts can render without holding anything.
///
/// [`snapshot`]: crate::wizard::WizardController::snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardState {
    /// The step currently shown to the user.
    pub current_step: WizardStep,
    /// Where the flow is in its lifecycle.
    pub phase: WizardPhase,
    /// Step 1 data.
    pub basic_info: BasicInfoRecord,
    /// Step 2 data.
    pub location_services: LocationServicesRecord,
    /// Step 3 data.
    pub verification: VerificationRecord,
    /// Step 4 data.
    pub review: ReviewRecord,
}

impl WizardState {
    /// Runs the validator for the given step against this state.
    #[must_use]
    pub fn validate_step(&self, step: WizardStep) -> FieldErrors {
        match step {
            WizardStep::BasicInfo => validate_basic_info(&self.basic_info),
            WizardStep::LocationServices => validate_location_services(&self.location_services),
            WizardStep::Verification => validate_verification(&self.verification),
            WizardStep::ReviewSubmit => validate_review(&self.review),
        }
    }

    /// Whether a jump to `step` is allowed from the current position.
    ///
    /// Jumps only go sideways or backwards; forward progress must go
    /// through [`WizardIntent::Advance`] so validation cannot be skipped.
    ///
    /// [`WizardIntent::Advance`]: crate::wizard::WizardIntent::Advance
    #[must_use]
    pub fn can_jump_to(&self, step: WizardStep) -> bool {
        step.index() <= self.current_step.index()
    }

    /// Assembles the submission payload from the four records.
    #[must_use]
    pub fn payload(&self) -> RegistrationPayload {
        RegistrationPayload::assemble(
            &self.basic_info,
            &self.location_services,
            &self.verification,
            &self.review,
        )
    }
}
