//! End-to-end tests driving the whole wizard: navigation, verification with
//! the simulated verifier, and submission through test gateways.

use crate::core::{
    BasicInfoPatch, LocationServicesPatch, RegistrationPayload, ReviewPatch, ServiceCategory,
    VerificationPatch, WizardPhase, WizardStep,
};
use crate::errors::WizardError;
use crate::events::CollectingEventSink;
use crate::gateway::{
    ApprovalStatus, GatewayError, MockSubmissionGateway, RecordingGateway, SubmissionGateway,
    SubmissionReceipt,
};
use crate::verify::{Channel, SimulatedVerifier, VerifyError, VerifyOutcome};
use crate::wizard::{WizardController, WizardIntent};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{advance, Instant};

/// A recording gateway that holds each submission for a fixed latency, so
/// tests can observe the in-flight window.
struct SlowGateway {
    inner: Arc<RecordingGateway>,
    latency: Duration,
}

#[async_trait]
impl SubmissionGateway for SlowGateway {
    async fn submit(
        &self,
        payload: &RegistrationPayload,
    ) -> Result<SubmissionReceipt, GatewayError> {
        tokio::time::sleep(self.latency).await;
        self.inner.submit(payload).await
    }
}

struct Harness {
    controller: Arc<WizardController>,
    verifier: Arc<SimulatedVerifier>,
    gateway: Arc<RecordingGateway>,
    events: Arc<CollectingEventSink>,
}

fn harness() -> Harness {
    let verifier = Arc::new(SimulatedVerifier::new());
    let gateway = Arc::new(RecordingGateway::new());
    let events = Arc::new(CollectingEventSink::new());
    let controller = Arc::new(
        WizardController::new(verifier.clone(), gateway.clone()).with_event_sink(events.clone()),
    );
    Harness {
        controller,
        verifier,
        gateway,
        events,
    }
}

fn fill_basic_info(controller: &WizardController) {
    controller
        .handle(WizardIntent::UpdateBasicInfo(
            BasicInfoPatch::new()
                .salon_name("Sarah's Hair Studio")
                .contact_name("Sarah")
                .email("s@x.com")
                .phone("5551234567")
                .password("longenough1")
                .confirm_password("longenough1"),
        ))
        .unwrap();
}

fn fill_location(controller: &WizardController) {
    controller
        .handle(WizardIntent::UpdateLocationServices(
            LocationServicesPatch::new()
                .address("1 Main St")
                .city("NYC")
                .state("NY")
                .zip_code("10001")
                .categories([ServiceCategory::Hair]),
        ))
        .unwrap();
}

/// Fills steps 1 and 2 and advances onto the verification step.
fn reach_verification(controller: &WizardController) {
    fill_basic_info(controller);
    controller.handle(WizardIntent::Advance).unwrap();
    fill_location(controller);
    controller.handle(WizardIntent::Advance).unwrap();
    assert_eq!(controller.current_step(), WizardStep::Verification);
}

/// Verifies both channels with the codes the simulator issued and advances
/// onto the review step.
async fn reach_review(controller: &WizardController, verifier: &SimulatedVerifier) {
    reach_verification(controller);
    for channel in Channel::ALL {
        controller.request_code(channel).await.unwrap();
        let code = verifier.issued_code(channel).unwrap();
        let patch = match channel {
            Channel::Email => VerificationPatch::new().email_code(code),
            Channel::Phone => VerificationPatch::new().phone_code(code),
        };
        controller
            .handle(WizardIntent::UpdateVerification(patch))
            .unwrap();
        let outcome = controller.verify_code(channel).await.unwrap();
        assert_eq!(outcome, VerifyOutcome::Verified);
    }
    controller.handle(WizardIntent::Advance).unwrap();
    assert_eq!(controller.current_step(), WizardStep::ReviewSubmit);
}

#[tokio::test(start_paused = true)]
async fn test_full_registration_journey() {
    let harness = harness();
    reach_review(&harness.controller, &harness.verifier).await;

    // The terms box is still unchecked, so submission is refused and the
    // gateway never hears about it.
    let err = harness.controller.submit().await.unwrap_err();
    match err {
        WizardError::Validation(failure) => {
            assert_eq!(failure.step, WizardStep::ReviewSubmit);
            assert!(failure.errors.get("agree_to_terms").is_some());
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert_eq!(harness.gateway.call_count(), 0);
    assert_eq!(harness.controller.phase(), WizardPhase::InProgress);

    harness
        .controller
        .handle(WizardIntent::UpdateReview(
            ReviewPatch::new()
                .agree_to_terms(true)
                .agree_to_marketing(true),
        ))
        .unwrap();
    let receipt = harness.controller.submit().await.unwrap();
    assert_eq!(receipt.status, ApprovalStatus::PendingReview);
    assert_eq!(harness.controller.phase(), WizardPhase::Submitted);

    // Exactly one submission, carrying the aggregated data.
    assert_eq!(harness.gateway.call_count(), 1);
    let payload = harness.gateway.last_payload().unwrap();
    assert_eq!(payload.salon_name, "Sarah's Hair Studio");
    assert_eq!(payload.full_address, "1 Main St, NYC, NY 10001");
    assert!(payload.categories.contains(&ServiceCategory::Hair));
    assert!(payload.email_verified);
    assert!(payload.phone_verified);
    assert!(payload.agree_to_terms);
    assert!(!payload.is_individual_stylist);

    // The confirmation field never leaves the wizard.
    let json = serde_json::to_value(&payload).unwrap();
    assert!(json.get("confirm_password").is_none());
    assert!(json.get("password").is_some());

    // A finished run refuses everything else.
    assert_eq!(
        harness.controller.handle(WizardIntent::Back).unwrap_err(),
        WizardError::AlreadySubmitted
    );
    assert_eq!(
        harness.controller.submit().await.unwrap_err(),
        WizardError::AlreadySubmitted
    );
    assert_eq!(harness.gateway.call_count(), 1);

    let kinds = harness.events.kinds();
    assert_eq!(
        kinds
            .iter()
            .filter(|kind| *kind == "wizard.step_advanced")
            .count(),
        3
    );
    assert!(kinds.contains(&"wizard.submitting".to_string()));
    assert_eq!(kinds.last().unwrap(), "wizard.submitted");
    assert_eq!(harness.events.events_of_kind("verify.").len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_second_submit_refused_while_first_in_flight() {
    let verifier = Arc::new(SimulatedVerifier::new());
    let recorder = Arc::new(RecordingGateway::new());
    let gateway = Arc::new(SlowGateway {
        inner: recorder.clone(),
        latency: Duration::from_secs(2),
    });
    let controller = Arc::new(WizardController::new(verifier.clone(), gateway));
    reach_review(&controller, &verifier).await;
    controller
        .handle(WizardIntent::UpdateReview(
            ReviewPatch::new().agree_to_terms(true),
        ))
        .unwrap();

    let submitter = controller.clone();
    let first = tokio::spawn(async move { submitter.submit().await });
    tokio::task::yield_now().await;
    assert_eq!(controller.phase(), WizardPhase::Submitting);

    // While the gateway call runs, every entry point is refused.
    assert_eq!(
        controller.submit().await.unwrap_err(),
        WizardError::SubmissionInFlight
    );
    assert_eq!(
        controller.handle(WizardIntent::Back).unwrap_err(),
        WizardError::SubmissionInFlight
    );
    assert_eq!(
        controller.verify_code(Channel::Email).await.unwrap_err(),
        WizardError::SubmissionInFlight
    );

    let receipt = first.await.unwrap().unwrap();
    assert_eq!(receipt.status, ApprovalStatus::PendingReview);
    assert_eq!(controller.phase(), WizardPhase::Submitted);
    assert_eq!(recorder.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_gateway_failure_keeps_data_for_retry() {
    let harness = harness();
    reach_review(&harness.controller, &harness.verifier).await;
    harness
        .controller
        .handle(WizardIntent::UpdateReview(
            ReviewPatch::new().agree_to_terms(true),
        ))
        .unwrap();

    harness.gateway.fail_next(GatewayError::Unavailable {
        message: "connection refused".to_string(),
    });
    let err = harness.controller.submit().await.unwrap_err();
    assert_eq!(
        err,
        WizardError::Gateway(GatewayError::Unavailable {
            message: "connection refused".to_string(),
        })
    );

    // Still on the review step with everything entered, ready to retry.
    assert_eq!(harness.controller.phase(), WizardPhase::InProgress);
    assert_eq!(harness.controller.current_step(), WizardStep::ReviewSubmit);
    let state = harness.controller.snapshot();
    assert_eq!(state.basic_info.salon_name, "Sarah's Hair Studio");
    assert!(state.verification.both_verified());
    assert!(harness
        .events
        .kinds()
        .contains(&"wizard.submit_failed".to_string()));

    let receipt = harness.controller.submit().await.unwrap();
    assert_eq!(receipt.status, ApprovalStatus::PendingReview);
    assert_eq!(harness.gateway.call_count(), 2);
    assert_eq!(harness.controller.phase(), WizardPhase::Submitted);
}

#[tokio::test(start_paused = true)]
async fn test_mock_gateway_sees_exactly_one_submission() {
    let mut mock = MockSubmissionGateway::new();
    mock.expect_submit()
        .withf(|payload: &RegistrationPayload| {
            payload.agree_to_terms && payload.email_verified && payload.phone_verified
        })
        .times(1)
        .returning(|_| Ok(SubmissionReceipt::pending_review()));

    let verifier = Arc::new(SimulatedVerifier::new());
    let controller = WizardController::new(verifier.clone(), Arc::new(mock));
    reach_review(&controller, &verifier).await;
    controller
        .handle(WizardIntent::UpdateReview(
            ReviewPatch::new().agree_to_terms(true),
        ))
        .unwrap();

    controller.submit().await.unwrap();
    assert_eq!(
        controller.submit().await.unwrap_err(),
        WizardError::AlreadySubmitted
    );
}

#[tokio::test(start_paused = true)]
async fn test_going_back_preserves_data_and_verified_flags() {
    let harness = harness();
    reach_verification(&harness.controller);

    harness
        .controller
        .request_code(Channel::Email)
        .await
        .unwrap();
    let code = harness.verifier.issued_code(Channel::Email).unwrap();
    harness
        .controller
        .handle(WizardIntent::UpdateVerification(
            VerificationPatch::new().email_code(code),
        ))
        .unwrap();
    harness
        .controller
        .verify_code(Channel::Email)
        .await
        .unwrap();

    harness.controller.handle(WizardIntent::Back).unwrap();
    harness
        .controller
        .handle(WizardIntent::JumpTo(WizardStep::BasicInfo))
        .unwrap();

    let state = harness.controller.snapshot();
    assert_eq!(state.basic_info.salon_name, "Sarah's Hair Studio");
    assert_eq!(state.location_services.city, "NYC");
    assert!(state.verification.email_verified);

    // Walking forward again does not ask for anything twice.
    harness.controller.handle(WizardIntent::Advance).unwrap();
    harness.controller.handle(WizardIntent::Advance).unwrap();
    assert_eq!(harness.controller.current_step(), WizardStep::Verification);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_async_operations() {
    let harness = harness();
    reach_verification(&harness.controller);
    harness.controller.cancel("session expired");

    let expected = WizardError::Cancelled {
        reason: "session expired".to_string(),
    };
    assert_eq!(
        harness
            .controller
            .request_code(Channel::Email)
            .await
            .unwrap_err(),
        expected
    );
    assert_eq!(
        harness
            .controller
            .verify_code(Channel::Email)
            .await
            .unwrap_err(),
        expected
    );
    assert_eq!(harness.controller.submit().await.unwrap_err(), expected);
    assert_eq!(
        harness
            .controller
            .handle(WizardIntent::Advance)
            .unwrap_err(),
        expected
    );
    assert_eq!(harness.gateway.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_resend_cooldown_through_controller() {
    let harness = harness();
    reach_verification(&harness.controller);

    harness
        .controller
        .request_code(Channel::Email)
        .await
        .unwrap();
    assert_eq!(harness.controller.cooldown_remaining(Channel::Email), 60);

    let err = harness
        .controller
        .request_code(Channel::Email)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        WizardError::Verify(VerifyError::CooldownActive {
            channel: Channel::Email,
            remaining_secs: 60,
        })
    );

    // The phone channel has its own independent cooldown.
    harness
        .controller
        .request_code(Channel::Phone)
        .await
        .unwrap();

    advance(Duration::from_secs(60)).await;
    assert_eq!(harness.controller.cooldown_remaining(Channel::Email), 0);
    harness
        .controller
        .request_code(Channel::Email)
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_channels_verify_concurrently() {
    let harness = harness();
    reach_verification(&harness.controller);
    harness
        .controller
        .handle(WizardIntent::UpdateVerification(
            VerificationPatch::new()
                .email_code("111111")
                .phone_code("222222"),
        ))
        .unwrap();

    let started = Instant::now();
    let (email, phone) = futures::join!(
        harness.controller.verify_code(Channel::Email),
        harness.controller.verify_code(Channel::Phone),
    );
    assert_eq!(email.unwrap(), VerifyOutcome::Verified);
    assert_eq!(phone.unwrap(), VerifyOutcome::Verified);

    // Both provider round trips ran in the same window.
    assert_eq!(started.elapsed(), Duration::from_millis(1500));
    assert!(harness.controller.snapshot().verification.both_verified());
}

#[tokio::test(start_paused = true)]
async fn test_one_verification_per_channel_at_a_time() {
    let harness = harness();
    reach_verification(&harness.controller);
    harness
        .controller
        .handle(WizardIntent::UpdateVerification(
            VerificationPatch::new().email_code("123456"),
        ))
        .unwrap();

    let (first, second) = futures::join!(
        harness.controller.verify_code(Channel::Email),
        harness.controller.verify_code(Channel::Email),
    );
    assert_eq!(first.unwrap(), VerifyOutcome::Verified);
    assert_eq!(
        second.unwrap_err(),
        WizardError::Verify(VerifyError::AlreadyInFlight {
            channel: Channel::Email,
        })
    );

    // The slot frees up once the first attempt finishes.
    let again = harness.controller.verify_code(Channel::Email).await;
    assert_eq!(again.unwrap(), VerifyOutcome::Verified);
}

#[tokio::test(start_paused = true)]
async fn test_event_stream_tells_the_story() {
    let harness = harness();

    let _ = harness.controller.handle(WizardIntent::Advance);
    fill_basic_info(&harness.controller);
    harness.controller.handle(WizardIntent::Advance).unwrap();
    harness.controller.handle(WizardIntent::Back).unwrap();
    harness.controller.handle(WizardIntent::Advance).unwrap();

    assert_eq!(
        harness.events.kinds(),
        vec![
            "wizard.step_blocked",
            "wizard.step_advanced",
            "wizard.stepped_back",
            "wizard.step_advanced",
        ]
    );
}
