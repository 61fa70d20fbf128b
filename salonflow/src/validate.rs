//! Field validation for wizard steps and the customer signup form.
//!
//! Validators are pure: they take a record and return the full set of
//! problems keyed by field name, with the messages shown to applicants.
//! Whitespace-only text fields count as missing; passwords are compared
//! and measured exactly as entered.

use crate::core::{
    BasicInfoRecord, CustomerProfileRecord, LocationServicesRecord, ReviewRecord,
    VerificationRecord, CODE_LEN,
};
use crate::verify::Channel;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Loose email shape check: something, an `@`, something, a dot, something.
#[allow(clippy::expect_used)]
fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("hard-coded pattern compiles"))
}

/// Returns true if the string plausibly looks like an email address.
#[must_use]
pub fn is_plausible_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Returns true if the string is exactly six ASCII digits.
#[must_use]
pub fn is_six_digit_code(code: &str) -> bool {
    code.len() == CODE_LEN && code.chars().all(|c| c.is_ascii_digit())
}

/// Validation problems keyed by field name.
///
/// Empty means the record is valid. Iteration order is stable (sorted by
/// field name).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a problem for a field.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// The message for a field, if it has a problem.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// The names of all invalid fields.
    #[must_use]
    pub fn fields(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// Returns true if no field has a problem.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of invalid fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

/// Validates the basic-info step.
#[must_use]
pub fn validate_basic_info(record: &BasicInfoRecord) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if record.salon_name.trim().is_empty() {
        errors.insert("salon_name", "Salon name is required");
    }

    if !record.is_individual_stylist && record.contact_name.trim().is_empty() {
        errors.insert("contact_name", "Contact name is required");
    }

    if record.email.trim().is_empty() {
        errors.insert("email", "Email is required");
    } else if !is_plausible_email(&record.email) {
        errors.insert("email", "Please enter a valid email");
    }

    if record.phone.trim().is_empty() {
        errors.insert("phone", "Phone number is required");
    }

    // Passwords are checked exactly as entered, untrimmed.
    if record.password.is_empty() {
        errors.insert("password", "Password is required");
    } else if record.password.chars().count() < 8 {
        errors.insert("password", "Password must be at least 8 characters");
    }

    if record.password != record.confirm_password {
        errors.insert("confirm_password", "Passwords do not match");
    }

    errors
}

/// Validates the location-and-services step.
#[must_use]
pub fn validate_location_services(record: &LocationServicesRecord) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if record.address.trim().is_empty() {
        errors.insert("address", "Street address is required");
    }

    if record.city.trim().is_empty() {
        errors.insert("city", "City is required");
    }

    if record.state.trim().is_empty() {
        errors.insert("state", "State is required");
    }

    if record.zip_code.trim().is_empty() {
        errors.insert("zip_code", "ZIP code is required");
    }

    if record.categories.is_empty() {
        errors.insert("categories", "Please select at least one service category");
    }

    errors
}

/// Validates the entered codes on the verification step.
///
/// Each channel still awaiting verification must have a well-formed six-digit
/// code. Already-verified channels are not re-checked. Whether the channels
/// have actually been verified is the controller's exit condition, not a
/// field problem.
#[must_use]
pub fn validate_verification(record: &VerificationRecord) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !record.is_verified(Channel::Email) && !is_six_digit_code(&record.email_code) {
        errors.insert(
            "email_code",
            "Please enter the 6-digit email verification code",
        );
    }

    if !record.is_verified(Channel::Phone) && !is_six_digit_code(&record.phone_code) {
        errors.insert(
            "phone_code",
            "Please enter the 6-digit phone verification code",
        );
    }

    errors
}

/// Validates the review step.
#[must_use]
pub fn validate_review(record: &ReviewRecord) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !record.agree_to_terms {
        errors.insert(
            "agree_to_terms",
            "You must agree to the Terms of Service to continue",
        );
    }

    errors
}

/// Validates the customer signup form.
#[must_use]
pub fn validate_customer_profile(record: &CustomerProfileRecord) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if record.first_name.trim().is_empty() {
        errors.insert("first_name", "First name is required");
    }

    if record.last_name.trim().is_empty() {
        errors.insert("last_name", "Last name is required");
    }

    if record.email.trim().is_empty() {
        errors.insert("email", "Email is required");
    } else if !is_plausible_email(&record.email) {
        errors.insert("email", "Please enter a valid email");
    }

    if record.phone.trim().is_empty() {
        errors.insert("phone", "Phone number is required");
    }

    if record.location.trim().is_empty() {
        errors.insert("location", "Location is required");
    }

    if record.password.is_empty() {
        errors.insert("password", "Password is required");
    } else if record.password.chars().count() < 8 {
        errors.insert("password", "Password must be at least 8 characters");
    }

    if record.password != record.confirm_password {
        errors.insert("confirm_password", "Passwords do not match");
    }

    errors
}
