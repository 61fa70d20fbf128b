//! The aggregated submission payload.

use crate::core::category::ServiceCategory;
use crate::core::records::{
    BasicInfoRecord, LocationServicesRecord, ReviewRecord, VerificationRecord,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything the wizard hands to the submission gateway.
///
/// Aggregates the four step records into one flat structure. The password
/// confirmation and the raw verification codes have no fields here, so they
/// cannot leak into a serialized submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationPayload {
    /// Business name of the salon.
    pub salon_name: String,
    /// Name of the contact person.
    pub contact_name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Chosen account password.
    pub password: String,
    /// Whether the applicant is an individual stylist.
    pub is_individual_stylist: bool,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// ZIP or postal code.
    pub zip_code: String,
    /// The address formatted as a single line.
    pub full_address: String,
    /// Offered service categories.
    pub categories: BTreeSet<ServiceCategory>,
    /// Whether the email channel was verified.
    pub email_verified: bool,
    /// Whether the phone channel was verified.
    pub phone_verified: bool,
    /// Terms of Service agreement.
    pub agree_to_terms: bool,
    /// Marketing opt-in.
    pub agree_to_marketing: bool,
    /// When the payload was assembled.
    pub submitted_at: DateTime<Utc>,
}

impl RegistrationPayload {
    /// Assembles a payload from the four step records, stamped with the
    /// current time.
    #[must_use]
    pub fn assemble(
        basic_info: &BasicInfoRecord,
        location: &LocationServicesRecord,
        verification: &VerificationRecord,
        review: &ReviewRecord,
    ) -> Self {
        Self {
            salon_name: basic_info.salon_name.clone(),
            contact_name: basic_info.contact_name.clone(),
            email: basic_info.email.clone(),
            phone: basic_info.phone.clone(),
            password: basic_info.password.clone(),
            is_individual_stylist: basic_info.is_individual_stylist,
            address: location.address.clone(),
            city: location.city.clone(),
            state: location.state.clone(),
            zip_code: location.zip_code.clone(),
            full_address: location.full_address(),
            categories: location.categories.clone(),
            email_verified: verification.email_verified,
            phone_verified: verification.phone_verified,
            agree_to_terms: review.agree_to_terms,
            agree_to_marketing: review.agree_to_marketing,
            submitted_at: crate::utils::now_utc(),
        }
    }
}
