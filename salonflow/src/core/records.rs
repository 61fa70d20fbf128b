//! Per-step wizard records and their patch types.
//!
//! Each wizard step edits exactly one record. Consumers never mutate records
//! directly; they send a patch (only the fields that changed) through the
//! controller, which applies it to the state it owns.

use crate::core::category::ServiceCategory;
use crate::verify::Channel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Maximum length of a verification code.
pub const CODE_LEN: usize = 6;

/// Keeps only ASCII digits and truncates to [`CODE_LEN`].
fn sanitize_code(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(CODE_LEN)
        .collect()
}

/// Salon identity, contact details, and credentials (step 1).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfoRecord {
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
    /// Password confirmation, compared but never submitted.
    pub confirm_password: String,
    /// Whether the applicant is an individual stylist rather than a salon.
    pub is_individual_stylist: bool,
}

impl BasicInfoRecord {
    /// Applies a patch, keeping unpatched fields as they are.
    ///
    /// Setting `individual_stylist(true)` also copies the current salon name
    /// into `contact_name`; setting it back to false leaves the copied value
    /// in place.
    pub fn apply(&mut self, patch: BasicInfoPatch) {
        if let Some(value) = patch.salon_name {
            self.salon_name = value;
        }
        if let Some(value) = patch.contact_name {
            self.contact_name = value;
        }
        if let Some(value) = patch.email {
            self.email = value;
        }
        if let Some(value) = patch.phone {
            self.phone = value;
        }
        if let Some(value) = patch.password {
            self.password = value;
        }
        if let Some(value) = patch.confirm_password {
            self.confirm_password = value;
        }
        if let Some(enabled) = patch.is_individual_stylist {
            self.is_individual_stylist = enabled;
            if enabled {
                self.contact_name = self.salon_name.clone();
            }
        }
    }
}

/// Partial update for [`BasicInfoRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfoPatch {
    /// New salon name, if changed.
    pub salon_name: Option<String>,
    /// New contact name, if changed.
    pub contact_name: Option<String>,
    /// New email address, if changed.
    pub email: Option<String>,
    /// New phone number, if changed.
    pub phone: Option<String>,
    /// New password, if changed.
    pub password: Option<String>,
    /// New password confirmation, if changed.
    pub confirm_password: Option<String>,
    /// New individual-stylist flag, if toggled.
    pub is_individual_stylist: Option<bool>,
}

impl BasicInfoPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the salon name.
    #[must_use]
    pub fn salon_name(mut self, value: impl Into<String>) -> Self {
        self.salon_name = Some(value.into());
        self
    }

    /// Sets the contact name.
    #[must_use]
    pub fn contact_name(mut self, value: impl Into<String>) -> Self {
        self.contact_name = Some(value.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.phone = Some(value.into());
        self
    }

    /// Sets the password.
    #[must_use]
    pub fn password(mut self, value: impl Into<String>) -> Self {
        self.password = Some(value.into());
        self
    }

    /// Sets the password confirmation.
    #[must_use]
    pub fn confirm_password(mut self, value: impl Into<String>) -> Self {
        self.confirm_password = Some(value.into());
        self
    }

    /// Toggles the individual-stylist flag.
    #[must_use]
    pub fn individual_stylist(mut self, enabled: bool) -> Self {
        self.is_individual_stylist = Some(enabled);
        self
    }
}

/// Street address and offered service categories (step 2).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationServicesRecord {
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// ZIP or postal code.
    pub zip_code: String,
    /// Offered service categories; must be non-empty to pass validation.
    pub categories: BTreeSet<ServiceCategory>,
}

impl LocationServicesRecord {
    /// Applies a patch, keeping unpatched fields as they are.
    pub fn apply(&mut self, patch: LocationServicesPatch) {
        if let Some(value) = patch.address {
            self.address = value;
        }
        if let Some(value) = patch.city {
            self.city = value;
        }
        if let Some(value) = patch.state {
            self.state = value;
        }
        if let Some(value) = patch.zip_code {
            self.zip_code = value;
        }
        if let Some(value) = patch.categories {
            self.categories = value;
        }
    }

    /// Adds the category if absent, removes it if present.
    pub fn toggle_category(&mut self, category: ServiceCategory) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    /// The address formatted for display and submission.
    #[must_use]
    pub fn full_address(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address, self.city, self.state, self.zip_code
        )
    }
}

/// Partial update for [`LocationServicesRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationServicesPatch {
    /// New street address, if changed.
    pub address: Option<String>,
    /// New city, if changed.
    pub city: Option<String>,
    /// New state, if changed.
    pub state: Option<String>,
    /// New ZIP code, if changed.
    pub zip_code: Option<String>,
    /// Replacement category set, if changed wholesale.
    pub categories: Option<BTreeSet<ServiceCategory>>,
}

impl LocationServicesPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the street address.
    #[must_use]
    pub fn address(mut self, value: impl Into<String>) -> Self {
        self.address = Some(value.into());
        self
    }

    /// Sets the city.
    #[must_use]
    pub fn city(mut self, value: impl Into<String>) -> Self {
        self.city = Some(value.into());
        self
    }

    /// Sets the state.
    #[must_use]
    pub fn state(mut self, value: impl Into<String>) -> Self {
        self.state = Some(value.into());
        self
    }

    /// Sets the ZIP code.
    #[must_use]
    pub fn zip_code(mut self, value: impl Into<String>) -> Self {
        self.zip_code = Some(value.into());
        self
    }

    /// Replaces the whole category set.
    #[must_use]
    pub fn categories(mut self, value: impl IntoIterator<Item = ServiceCategory>) -> Self {
        self.categories = Some(value.into_iter().collect());
        self
    }
}

/// Email and phone verification state (step 3).
///
/// Codes are entered by the applicant; the verified flags are only ever set
/// by the controller after the verifier accepts a code. Patches cannot forge
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Code entered for the email channel, digits only, at most 6.
    pub email_code: String,
    /// Code entered for the phone channel, digits only, at most 6.
    pub phone_code: String,
    /// Whether the email channel has been verified.
    pub email_verified: bool,
    /// Whether the phone channel has been verified.
    pub phone_verified: bool,
}

impl VerificationRecord {
    /// Stores an entered code, dropping non-digits and truncating to 6.
    pub fn set_code(&mut self, channel: Channel, raw: &str) {
        let code = sanitize_code(raw);
        match channel {
            Channel::Email => self.email_code = code,
            Channel::Phone => self.phone_code = code,
        }
    }

    /// The code currently entered for a channel.
    #[must_use]
    pub fn code(&self, channel: Channel) -> &str {
        match channel {
            Channel::Email => &self.email_code,
            Channel::Phone => &self.phone_code,
        }
    }

    /// Whether a channel has been verified.
    #[must_use]
    pub fn is_verified(&self, channel: Channel) -> bool {
        match channel {
            Channel::Email => self.email_verified,
            Channel::Phone => self.phone_verified,
        }
    }

    /// Marks a channel verified. Flags only ever go from false to true.
    pub fn mark_verified(&mut self, channel: Channel) {
        match channel {
            Channel::Email => self.email_verified = true,
            Channel::Phone => self.phone_verified = true,
        }
    }

    /// Whether both channels have been verified.
    #[must_use]
    pub fn both_verified(&self) -> bool {
        self.email_verified && self.phone_verified
    }
}

/// Partial update for [`VerificationRecord`]. Carries entered codes only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationPatch {
    /// New email code input, if changed. Sanitized on apply.
    pub email_code: Option<String>,
    /// New phone code input, if changed. Sanitized on apply.
    pub phone_code: Option<String>,
}

impl VerificationPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the email code input.
    #[must_use]
    pub fn email_code(mut self, value: impl Into<String>) -> Self {
        self.email_code = Some(value.into());
        self
    }

    /// Sets the phone code input.
    #[must_use]
    pub fn phone_code(mut self, value: impl Into<String>) -> Self {
        self.phone_code = Some(value.into());
        self
    }
}

impl VerificationRecord {
    /// Applies a patch, sanitizing each entered code.
    pub fn apply(&mut self, patch: VerificationPatch) {
        if let Some(raw) = patch.email_code {
            self.set_code(Channel::Email, &raw);
        }
        if let Some(raw) = patch.phone_code {
            self.set_code(Channel::Phone, &raw);
        }
    }
}

/// Terms agreement and marketing opt-in (step 4).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Whether the applicant agreed to the Terms of Service. Required.
    pub agree_to_terms: bool,
    /// Whether the applicant opted into marketing email. Optional.
    pub agree_to_marketing: bool,
}

impl ReviewRecord {
    /// Applies a patch, keeping unpatched fields as they are.
    pub fn apply(&mut self, patch: ReviewPatch) {
        if let Some(value) = patch.agree_to_terms {
            self.agree_to_terms = value;
        }
        if let Some(value) = patch.agree_to_marketing {
            self.agree_to_marketing = value;
        }
    }
}

/// Partial update for [`ReviewRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPatch {
    /// New terms agreement, if toggled.
    pub agree_to_terms: Option<bool>,
    /// New marketing opt-in, if toggled.
    pub agree_to_marketing: Option<bool>,
}

impl ReviewPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the terms agreement.
    #[must_use]
    pub fn agree_to_terms(mut self, value: bool) -> Self {
        self.agree_to_terms = Some(value);
        self
    }

    /// Sets the marketing opt-in.
    #[must_use]
    pub fn agree_to_marketing(mut self, value: bool) -> Self {
        self.agree_to_marketing = Some(value);
        self
    }
}
