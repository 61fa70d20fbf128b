//! Customer signup record.
//!
//! Customers register through a single form rather than the salon wizard;
//! this is that form's record, validated with
//! [`validate_customer_profile`](crate::validate::validate_customer_profile).

use serde::{Deserialize, Serialize};

/// A prospective customer's signup details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfileRecord {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Free-form location (city or neighborhood).
    pub location: String,
    /// Chosen account password.
    pub password: String,
    /// Password confirmation, compared but never submitted.
    pub confirm_password: String,
}

impl CustomerProfileRecord {
    /// Applies a patch, keeping unpatched fields as they are.
    pub fn apply(&mut self, patch: CustomerProfilePatch) {
        if let Some(value) = patch.first_name {
            self.first_name = value;
        }
        if let Some(value) = patch.last_name {
            self.last_name = value;
        }
        if let Some(value) = patch.email {
            self.email = value;
        }
        if let Some(value) = patch.phone {
            self.phone = value;
        }
        if let Some(value) = patch.location {
            self.location = value;
        }
        if let Some(value) = patch.password {
            self.password = value;
        }
        if let Some(value) = patch.confirm_password {
            self.confirm_password = value;
        }
    }

    /// First and last name joined for display.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Partial update for [`CustomerProfileRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfilePatch {
    /// New given name, if changed.
    pub first_name: Option<String>,
    /// New family name, if changed.
    pub last_name: Option<String>,
    /// New email address, if changed.
    pub email: Option<String>,
    /// New phone number, if changed.
    pub phone: Option<String>,
    /// New location, if changed.
    pub location: Option<String>,
    /// New password, if changed.
    pub password: Option<String>,
    /// New password confirmation, if changed.
    pub confirm_password: Option<String>,
}

impl CustomerProfilePatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the given name.
    #[must_use]
    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    /// Sets the family name.
    #[must_use]
    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
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

    /// Sets the location.
    #[must_use]
    pub fn location(mut self, value: impl Into<String>) -> Self {
        self.location = Some(value.into());
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
}
