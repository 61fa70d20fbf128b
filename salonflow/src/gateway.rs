//! The submission gateway contract.
//!
//! The wizard hands the aggregated [`RegistrationPayload`] to a
//! [`SubmissionGateway`] exactly once per successful run. The real gateway
//! lives behind the marketplace API; this module carries the contract, a
//! latency-only simulation, and an in-memory recorder for tests.

use crate::core::RegistrationPayload;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Where a submitted registration sits in the approval pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Accepted and waiting for a reviewer.
    PendingReview,
    /// Approved; the salon is live.
    Approved,
    /// Rejected by a reviewer.
    Rejected,
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PendingReview => write!(f, "pending_review"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// The gateway's acknowledgement of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Identifier assigned to the registration.
    pub registration_id: Uuid,
    /// When the gateway accepted the submission.
    pub received_at: DateTime<Utc>,
    /// Approval pipeline position, [`ApprovalStatus::PendingReview`] on
    /// acceptance.
    pub status: ApprovalStatus,
}

impl SubmissionReceipt {
    /// Creates a receipt for a freshly accepted submission.
    #[must_use]
    pub fn pending_review() -> Self {
        Self {
            registration_id: crate::utils::generate_uuid(),
            received_at: crate::utils::now_utc(),
            status: ApprovalStatus::PendingReview,
        }
    }
}

/// Errors a gateway can report for a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The gateway refused the registration outright.
    #[error("Registration rejected: {reason}")]
    Rejected {
        /// Why the registration was refused.
        reason: String,
    },

    /// The gateway could not be reached.
    #[error("Submission service unavailable: {message}")]
    Unavailable {
        /// Transport-level detail.
        message: String,
    },

    /// The gateway did not answer in time.
    #[error("Submission timed out")]
    Timeout,
}

/// Contract for handing a completed registration to the marketplace.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Submits the aggregated registration.
    ///
    /// On success the registration enters the approval pipeline and the
    /// wizard run is over.
    async fn submit(&self, payload: &RegistrationPayload)
        -> Result<SubmissionReceipt, GatewayError>;
}

/// A latency-only stand-in for the marketplace gateway.
///
/// Sleeps for the configured round trip (2 s by default) and accepts every
/// submission into review.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    latency: Duration,
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self {
            latency: Duration::from_secs(2),
        }
    }
}

impl SimulatedGateway {
    /// Creates a gateway with the default 2-second round trip.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the simulated round-trip latency.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl SubmissionGateway for SimulatedGateway {
    async fn submit(
        &self,
        payload: &RegistrationPayload,
    ) -> Result<SubmissionReceipt, GatewayError> {
        tokio::time::sleep(self.latency).await;
        let receipt = SubmissionReceipt::pending_review();
        info!(
            registration_id = %receipt.registration_id,
            salon = %payload.salon_name,
            "Registration accepted for review"
        );
        Ok(receipt)
    }
}

/// An in-memory gateway that records every submission.
///
/// Useful in tests and demos: captures payloads, counts calls, and can be
/// armed to fail the next submission.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    payloads: Mutex<Vec<RegistrationPayload>>,
    call_count: AtomicUsize,
    next_failure: Mutex<Option<GatewayError>>,
}

impl RecordingGateway {
    /// Creates an empty recorder that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the recorder to fail the next submission with the given error.
    pub fn fail_next(&self, error: GatewayError) {
        *self.next_failure.lock() = Some(error);
    }

    /// The number of submissions received, including failed ones.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// All recorded payloads, in submission order.
    #[must_use]
    pub fn payloads(&self) -> Vec<RegistrationPayload> {
        self.payloads.lock().clone()
    }

    /// The most recently recorded payload, if any.
    #[must_use]
    pub fn last_payload(&self) -> Option<RegistrationPayload> {
        self.payloads.lock().last().cloned()
    }
}

#[async_trait]
impl SubmissionGateway for RecordingGateway {
    async fn submit(
        &self,
        payload: &RegistrationPayload,
    ) -> Result<SubmissionReceipt, GatewayError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().push(payload.clone());

        if let Some(error) = self.next_failure.lock().take() {
            return Err(error);
        }
        Ok(SubmissionReceipt::pending_review())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        BasicInfoRecord, LocationServicesRecord, ReviewRecord, VerificationRecord,
    };
    use tokio::time::Instant;

    fn empty_payload() -> RegistrationPayload {
        RegistrationPayload::assemble(
            &BasicInfoRecord::default(),
            &LocationServicesRecord::default(),
            &VerificationRecord::default(),
            &ReviewRecord::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_gateway_latency() {
        let gateway = SimulatedGateway::new();
        let before = Instant::now();

        let receipt = gateway.submit(&empty_payload()).await.unwrap();
        assert_eq!(before.elapsed(), Duration::from_secs(2));
        assert_eq!(receipt.status, ApprovalStatus::PendingReview);
    }

    #[tokio::test]
    async fn test_recording_gateway_captures_payloads() {
        let gateway = RecordingGateway::new();
        assert_eq!(gateway.call_count(), 0);

        gateway.submit(&empty_payload()).await.unwrap();
        gateway.submit(&empty_payload()).await.unwrap();

        assert_eq!(gateway.call_count(), 2);
        assert_eq!(gateway.payloads().len(), 2);
        assert!(gateway.last_payload().is_some());
    }

    #[tokio::test]
    async fn test_recording_gateway_fails_once_when_armed() {
        let gateway = RecordingGateway::new();
        gateway.fail_next(GatewayError::Timeout);

        let err = gateway.submit(&empty_payload()).await.unwrap_err();
        assert_eq!(err, GatewayError::Timeout);

        // The armed failure is consumed; the retry goes through.
        gateway.submit(&empty_payload()).await.unwrap();
        assert_eq!(gateway.call_count(), 2);
    }

    #[test]
    fn test_receipt_is_pending_review() {
        let receipt = SubmissionReceipt::pending_review();
        assert_eq!(receipt.status, ApprovalStatus::PendingReview);
        assert_eq!(receipt.status.to_string(), "pending_review");
    }

    #[test]
    fn test_gateway_error_display() {
        let err = GatewayError::Rejected {
            reason: "duplicate email".to_string(),
        };
        assert_eq!(err.to_string(), "Registration rejected: duplicate email");
        assert_eq!(GatewayError::Timeout.to_string(), "Submission timed out");
    }
}
