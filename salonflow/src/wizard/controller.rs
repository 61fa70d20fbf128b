//! The wizard controller: owns the state, applies intents, and drives the
//! async verification and submission flows.

use crate::cancellation::CancellationToken;
use crate::core::{WizardPhase, WizardStep};
use crate::errors::{ValidationFailure, WizardError};
use crate::events::{get_event_sink, EventSink, WizardEvent};
use crate::gateway::{SubmissionGateway, SubmissionReceipt};
use crate::verify::{Channel, CodeVerifier, VerifyError, VerifyOutcome};
use crate::wizard::{WizardIntent, WizardState};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Drives one registration run from the first step to submission.
///
/// The controller is the single writer of [`WizardState`]. Hosts send
/// [`WizardIntent`]s for edits and navigation, await [`request_code`],
/// [`verify_code`], and [`submit`] for the side-effectful operations, and
/// call [`snapshot`] whenever they need to render. All methods take `&self`,
/// so one controller can be shared across tasks behind an [`Arc`].
///
/// [`request_code`]: WizardController::request_code
/// [`verify_code`]: WizardController::verify_code
/// [`submit`]: WizardController::submit
/// [`snapshot`]: WizardController::snapshot
pub struct WizardController {
    state: RwLock<WizardState>,
    verifier: Arc<dyn CodeVerifier>,
    gateway: Arc<dyn SubmissionGateway>,
    events: Arc<dyn EventSink>,
    cancel: Arc<CancellationToken>,
    verifying: DashMap<Channel, ()>,
}

impl WizardController {
    /// Creates a controller on a fresh state.
    ///
    /// Events go to the globally registered sink; use
    /// [`with_event_sink`](Self::with_event_sink) to override it for this
    /// controller alone.
    #[must_use]
    pub fn new(verifier: Arc<dyn CodeVerifier>, gateway: Arc<dyn SubmissionGateway>) -> Self {
        Self {
            state: RwLock::new(WizardState::default()),
            verifier,
            gateway,
            events: get_event_sink(),
            cancel: Arc::new(CancellationToken::new()),
            verifying: DashMap::new(),
        }
    }

    /// Routes this controller's events to the given sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.events = sink;
        self
    }

    /// Ties this controller to an externally owned cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: Arc<CancellationToken>) -> Self {
        self.cancel = token;
        self
    }

    /// Applies an intent to the wizard state.
    ///
    /// Edits are accepted from any step; navigation is checked against the
    /// rules of the current step. Refused intents leave the state exactly as
    /// it was.
    pub fn handle(&self, intent: WizardIntent) -> Result<(), WizardError> {
        if self.cancel.is_cancelled() {
            return Err(self.cancelled_error());
        }
        debug!(intent = intent.kind(), "Handling wizard intent");

        let (result, event) = {
            let mut state = self.state.write();
            match state.phase {
                WizardPhase::Submitting => return Err(WizardError::SubmissionInFlight),
                WizardPhase::Submitted => return Err(WizardError::AlreadySubmitted),
                WizardPhase::InProgress => {}
            }
            Self::apply(&mut state, intent)
        };

        // The lock is released before the sink runs so a sink may call back
        // into the controller.
        if let Some(event) = event {
            self.events.try_emit(&event);
        }
        result
    }

    fn apply(
        state: &mut WizardState,
        intent: WizardIntent,
    ) -> (Result<(), WizardError>, Option<WizardEvent>) {
        match intent {
            WizardIntent::UpdateBasicInfo(patch) => {
                state.basic_info.apply(patch);
                (Ok(()), None)
            }
            WizardIntent::UpdateLocationServices(patch) => {
                state.location_services.apply(patch);
                (Ok(()), None)
            }
            WizardIntent::ToggleCategory(category) => {
                state.location_services.toggle_category(category);
                (Ok(()), None)
            }
            WizardIntent::UpdateVerification(patch) => {
                state.verification.apply(patch);
                (Ok(()), None)
            }
            WizardIntent::UpdateReview(patch) => {
                state.review.apply(patch);
                (Ok(()), None)
            }
            WizardIntent::Advance => Self::advance(state),
            WizardIntent::Back => Self::step_back(state),
            WizardIntent::JumpTo(target) => Self::jump(state, target),
        }
    }

    fn advance(state: &mut WizardState) -> (Result<(), WizardError>, Option<WizardEvent>) {
        let from = state.current_step;
        match from.next() {
            None => (Err(WizardError::AtFinalStep), None),
            Some(to) => {
                let errors = state.validate_step(from);
                if !errors.is_empty() {
                    let event = WizardEvent::step_blocked(from, &errors.fields());
                    return (Err(ValidationFailure::new(from, errors).into()), Some(event));
                }
                if from == WizardStep::Verification && !state.verification.both_verified() {
                    let email = state.verification.email_verified;
                    let phone = state.verification.phone_verified;
                    return (
                        Err(WizardError::VerificationIncomplete {
                            email_verified: email,
                            phone_verified: phone,
                        }),
                        Some(WizardEvent::verification_incomplete(email, phone)),
                    );
                }
                state.current_step = to;
                debug!(from = %from, to = %to, "Advanced to next step");
                (Ok(()), Some(WizardEvent::step_advanced(from, to)))
            }
        }
    }

    fn step_back(state: &mut WizardState) -> (Result<(), WizardError>, Option<WizardEvent>) {
        let from = state.current_step;
        match from.prev() {
            None => (Err(WizardError::AtFirstStep), None),
            Some(to) => {
                state.current_step = to;
                (Ok(()), Some(WizardEvent::stepped_back(from, to)))
            }
        }
    }

    fn jump(
        state: &mut WizardState,
        target: WizardStep,
    ) -> (Result<(), WizardError>, Option<WizardEvent>) {
        let from = state.current_step;
        if target == from {
            return (Ok(()), None);
        }
        if !state.can_jump_to(target) {
            return (
                Err(WizardError::ForwardJumpBlocked {
                    current: from,
                    requested: target,
                }),
                None,
            );
        }
        state.current_step = target;
        (Ok(()), Some(WizardEvent::jumped(from, target)))
    }

    /// Asks the verifier to issue (or reissue) a code for the channel.
    ///
    /// Refused while the channel's resend cooldown is running. There is no
    /// in-flight guard here; the cooldown alone paces requests.
    pub async fn request_code(&self, channel: Channel) -> Result<(), WizardError> {
        self.ensure_active()?;
        self.verifier.request_code(channel).await?;
        self.events.try_emit(&WizardEvent::code_requested(channel));
        Ok(())
    }

    /// Submits the code currently entered for the channel.
    ///
    /// At most one verification per channel runs at a time; the two channels
    /// verify independently and may overlap. A `Verified` outcome marks the
    /// channel in the state; a `Rejected` outcome changes nothing.
    pub async fn verify_code(&self, channel: Channel) -> Result<VerifyOutcome, WizardError> {
        self.ensure_active()?;

        let code = self.state.read().verification.code(channel).to_string();
        if self.verifying.insert(channel, ()).is_some() {
            return Err(VerifyError::AlreadyInFlight { channel }.into());
        }
        let _slot = InFlightSlot {
            slots: &self.verifying,
            channel,
        };

        let outcome = self.verifier.submit_code(channel, &code).await?;
        match outcome {
            VerifyOutcome::Verified => {
                self.state.write().verification.mark_verified(channel);
                info!(%channel, "Channel verified");
                self.events.try_emit(&WizardEvent::channel_verified(channel));
            }
            VerifyOutcome::Rejected => {
                debug!(%channel, "Verification code rejected");
                self.events.try_emit(&WizardEvent::code_rejected(channel));
            }
        }
        Ok(outcome)
    }

    /// Whole seconds until the channel accepts another resend request.
    #[must_use]
    pub fn cooldown_remaining(&self, channel: Channel) -> u64 {
        self.verifier.cooldown_remaining(channel)
    }

    /// Hands the completed registration to the gateway.
    ///
    /// Only available from the review step with the terms agreed. While the
    /// gateway call runs the phase is `Submitting` and every other entry
    /// point is refused, so the gateway is called at most once per run. On
    /// gateway failure the phase returns to `InProgress` with all entered
    /// data intact, ready for a retry.
    pub async fn submit(&self) -> Result<SubmissionReceipt, WizardError> {
        if self.cancel.is_cancelled() {
            return Err(self.cancelled_error());
        }

        let payload = {
            let mut state = self.state.write();
            match state.phase {
                WizardPhase::Submitting => return Err(WizardError::SubmissionInFlight),
                WizardPhase::Submitted => return Err(WizardError::AlreadySubmitted),
                WizardPhase::InProgress => {}
            }
            if state.current_step != WizardStep::ReviewSubmit {
                return Err(WizardError::NotOnReviewStep {
                    current: state.current_step,
                });
            }
            let errors = state.validate_step(WizardStep::ReviewSubmit);
            if !errors.is_empty() {
                return Err(ValidationFailure::new(WizardStep::ReviewSubmit, errors).into());
            }
            state.phase = WizardPhase::Submitting;
            state.payload()
        };
        self.events.try_emit(&WizardEvent::submitting());

        match self.gateway.submit(&payload).await {
            Ok(receipt) => {
                self.state.write().phase = WizardPhase::Submitted;
                info!(registration_id = %receipt.registration_id, "Registration submitted");
                self.events
                    .try_emit(&WizardEvent::submitted(&receipt.registration_id.to_string()));
                Ok(receipt)
            }
            Err(err) => {
                self.state.write().phase = WizardPhase::InProgress;
                warn!(error = %err, "Submission failed; staying on the review step");
                self.events
                    .try_emit(&WizardEvent::submit_failed(&err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Tears the run down. Every entry point refuses from here on.
    ///
    /// Idempotent: only the first call's reason is kept and announced.
    pub fn cancel(&self, reason: impl Into<String>) {
        if self.cancel.is_cancelled() {
            return;
        }
        let reason = reason.into();
        self.cancel.cancel(reason.clone());
        self.events.try_emit(&WizardEvent::cancelled(&reason));
    }

    /// Whether the run has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// A detached copy of the full wizard state, for rendering.
    #[must_use]
    pub fn snapshot(&self) -> WizardState {
        self.state.read().clone()
    }

    /// The step currently shown to the user.
    #[must_use]
    pub fn current_step(&self) -> WizardStep {
        self.state.read().current_step
    }

    /// Where the run is in its lifecycle.
    #[must_use]
    pub fn phase(&self) -> WizardPhase {
        self.state.read().phase
    }

    fn ensure_active(&self) -> Result<(), WizardError> {
        if self.cancel.is_cancelled() {
            return Err(self.cancelled_error());
        }
        match self.state.read().phase {
            WizardPhase::Submitting => Err(WizardError::SubmissionInFlight),
            WizardPhase::Submitted => Err(WizardError::AlreadySubmitted),
            WizardPhase::InProgress => Ok(()),
        }
    }

    fn cancelled_error(&self) -> WizardError {
        WizardError::Cancelled {
            reason: self.cancel.reason().unwrap_or_default(),
        }
    }
}

impl fmt::Debug for WizardController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("WizardController")
            .field("current_step", &state.current_step)
            .field("phase", &state.phase)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

/// Releases a channel's in-flight slot when the verification finishes,
/// whichever way it finishes.
struct InFlightSlot<'a> {
    slots: &'a DashMap<Channel, ()>,
    channel: Channel,
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.slots.remove(&self.channel);
    }
}
