//! # Salonflow
//!
//! The headless registration and operations engine for a salon booking
//! marketplace.
//!
//! Salonflow models the four-step salon registration wizard as a state
//! machine a host UI drives through typed intents, with support for:
//!
//! - **Step-gated navigation**: Forward transitions pass per-step validation
//! - **Typed intents**: Every state change flows through one entry point
//! - **Simulated verification**: Per-channel codes with delivery latency and
//!   resend cooldowns
//! - **Event-driven observability**: Lifecycle events for every transition
//! - **Cancellation handling**: One token tears down the whole flow
//!
//! The crate also carries the salon operations data layer (services, staff,
//! appointments) and the CSV exports the dashboard is built on.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use salonflow::prelude::*;
//! use std::sync::Arc;
//!
//! // Wire the controller to the simulated collaborators
//! let controller = WizardController::new(
//!     Arc::new(SimulatedVerifier::new()),
//!     Arc::new(SimulatedGateway::new()),
//! );
//!
//! // Fill the first step and move forward
//! controller.handle(WizardIntent::UpdateBasicInfo(
//!     BasicInfoPatch::new()
//!         .salon_name("Sarah's Hair Studio")
//!         .contact_name("Sarah")
//!         .email("sarah@example.com")
//!         .phone("5551234567")
//!         .password("longenough1")
//!         .confirm_password("longenough1"),
//! ))?;
//! controller.handle(WizardIntent::Advance)?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cancellation;
pub mod core;
pub mod errors;
pub mod events;
pub mod export;
pub mod gateway;
pub mod salon;
pub mod utils;
pub mod validate;
pub mod verify;
pub mod wizard;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cancellation::CancellationToken;
    pub use crate::core::{
        BasicInfoPatch, BasicInfoRecord, LocationServicesPatch, LocationServicesRecord,
        RegistrationPayload, ReviewPatch, ReviewRecord, ServiceCategory, VerificationPatch,
        VerificationRecord, WizardPhase, WizardStep,
    };
    pub use crate::errors::{ValidationFailure, WizardError};
    pub use crate::events::{
        CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink, WizardEvent,
    };
    pub use crate::export::{render_csv, CsvDocument, CsvRow};
    pub use crate::gateway::{
        ApprovalStatus, GatewayError, RecordingGateway, SimulatedGateway, SubmissionGateway,
        SubmissionReceipt,
    };
    pub use crate::salon::{
        AppointmentFilter, AppointmentRecord, AppointmentStatus, AppointmentStore, EmployeeRecord,
        EmployeeStore, ServiceRecord, ServiceStore,
    };
    pub use crate::utils::{generate_uuid, iso_timestamp, Timestamp};
    pub use crate::validate::FieldErrors;
    pub use crate::verify::{Channel, CodeVerifier, SimulatedVerifier, VerifyError, VerifyOutcome};
    pub use crate::wizard::{WizardController, WizardIntent, WizardState};
}
