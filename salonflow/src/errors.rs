//! Error types for the registration engine.
//!
//! Nothing here is fatal: every error leaves the wizard in a consistent
//! state. Validation failures carry the field problems so hosts can show
//! them inline; navigation refusals say why the move was refused.

use crate::core::WizardStep;
use crate::gateway::GatewayError;
use crate::validate::FieldErrors;
use crate::verify::VerifyError;
use thiserror::Error;

/// A step's validator refused to let the applicant continue.
///
/// Always recoverable: fix the listed fields and try again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Step {step} is invalid: {errors}")]
pub struct ValidationFailure {
    /// The step that failed validation.
    pub step: WizardStep,
    /// The problems, keyed by field name.
    pub errors: FieldErrors,
}

impl ValidationFailure {
    /// Creates a validation failure for a step.
    #[must_use]
    pub fn new(step: WizardStep, errors: FieldErrors) -> Self {
        Self { step, errors }
    }
}

/// Everything that can go wrong while driving the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// The current step's fields do not pass validation.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// Leaving the verification step requires both channels verified.
    #[error(
        "Both contact channels must be verified to continue \
         (email verified: {email_verified}, phone verified: {phone_verified})"
    )]
    VerificationIncomplete {
        /// Whether the email channel is verified.
        email_verified: bool,
        /// Whether the phone channel is verified.
        phone_verified: bool,
    },

    /// Jumps may only target the current or an earlier step.
    #[error("Cannot jump forward from {current} to {requested}")]
    ForwardJumpBlocked {
        /// The step the wizard is on.
        current: WizardStep,
        /// The later step that was requested.
        requested: WizardStep,
    },

    /// There is no step before the first one.
    #[error("Already at the first step")]
    AtFirstStep,

    /// There is no step after the last one; finishing goes through submit.
    #[error("Already at the final step")]
    AtFinalStep,

    /// Submission is only available from the review step.
    #[error("Submission is only available from the review step (currently on {current})")]
    NotOnReviewStep {
        /// The step the wizard is on.
        current: WizardStep,
    },

    /// A submission is already on its way to the gateway.
    #[error("A submission is already in flight")]
    SubmissionInFlight,

    /// The run already finished; a submitted wizard accepts nothing further.
    #[error("The registration has already been submitted")]
    AlreadySubmitted,

    /// The verification contract refused an operation.
    #[error(transparent)]
    Verify(#[from] VerifyError),

    /// The gateway refused or failed the submission. The wizard stays on
    /// the review step with everything entered intact.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The flow was cancelled before the operation started.
    #[error("The registration flow was cancelled: {reason}")]
    Cancelled {
        /// Why the flow was torn down.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::Channel;

    #[test]
    fn test_validation_failure_display() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "Email is required");
        let failure = ValidationFailure::new(WizardStep::BasicInfo, errors);
        assert_eq!(
            failure.to_string(),
            "Step basic_info is invalid: email: Email is required"
        );
    }

    #[test]
    fn test_wizard_error_from_validation() {
        let failure = ValidationFailure::new(WizardStep::BasicInfo, FieldErrors::new());
        let err: WizardError = failure.clone().into();
        assert_eq!(err, WizardError::Validation(failure));
    }

    #[test]
    fn test_wizard_error_from_verify() {
        let err: WizardError = VerifyError::AlreadyInFlight {
            channel: Channel::Email,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "A verification for email is already in flight"
        );
    }

    #[test]
    fn test_forward_jump_display() {
        let err = WizardError::ForwardJumpBlocked {
            current: WizardStep::BasicInfo,
            requested: WizardStep::Verification,
        };
        assert_eq!(
            err.to_string(),
            "Cannot jump forward from basic_info to verification"
        );
    }

    #[test]
    fn test_gateway_error_is_transparent() {
        let err: WizardError = GatewayError::Timeout.into();
        assert_eq!(err.to_string(), "Submission timed out");
    }
}
