//! Core domain model types for salonflow.
//!
//! This module contains the fundamental types used throughout the engine:
//! - Wizard step and lifecycle phase enums
//! - The service category catalog
//! - Per-step records with their patch types
//! - The aggregated submission payload

mod category;
mod customer;
mod payload;
mod records;
mod step;

pub use category::{CategoryParseError, ServiceCategory};
pub use customer::{CustomerProfilePatch, CustomerProfileRecord};
pub use payload::RegistrationPayload;
pub use records::{
    BasicInfoPatch, BasicInfoRecord, LocationServicesPatch, LocationServicesRecord, ReviewPatch,
    ReviewRecord, VerificationPatch, VerificationRecord, CODE_LEN,
};
pub use step::{WizardPhase, WizardStep};
