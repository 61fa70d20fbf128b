//! In-memory records for a salon's operational data: offered services,
//! staff, and booked appointments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A service the salon offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name, e.g. "Hair Cut & Style".
    pub name: String,
    /// Free-form category label, e.g. "Hair".
    pub category: String,
    /// How long one booking takes.
    pub duration_minutes: u32,
    /// Price in the marketplace currency.
    pub price: f64,
    /// Short description shown to customers.
    pub description: String,
    /// Optional image URL.
    pub image: Option<String>,
    /// Whether the service is currently bookable.
    pub is_active: bool,
}

impl ServiceRecord {
    /// Creates an active service with a fresh identifier.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        duration_minutes: u32,
        price: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: crate::utils::generate_uuid(),
            name: name.into(),
            category: category.into(),
            duration_minutes,
            price,
            description: description.into(),
            image: None,
            is_active: true,
        }
    }

    /// Sets the image URL.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }
}

/// A staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Job title, e.g. "Hair Stylist".
    pub role: String,
    /// Named skills, shown on the staff profile.
    pub specialties: Vec<String>,
    /// Work email address.
    pub email: String,
    /// Work phone number.
    pub phone: String,
    /// Short biography.
    pub bio: String,
    /// Optional photo URL.
    pub image: Option<String>,
    /// Average customer rating, 0.0 when unrated.
    pub rating: f64,
    /// Years of experience.
    pub experience_years: u32,
    /// Whether the employee currently takes bookings.
    pub is_active: bool,
    /// Working days, e.g. `["Mon", "Tue", "Wed"]`.
    pub schedule: Vec<String>,
}

impl EmployeeRecord {
    /// Creates an active employee with a fresh identifier.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: crate::utils::generate_uuid(),
            name: name.into(),
            role: role.into(),
            specialties: Vec::new(),
            email: email.into(),
            phone: phone.into(),
            bio: String::new(),
            image: None,
            rating: 0.0,
            experience_years: 0,
            is_active: true,
            schedule: Vec::new(),
        }
    }

    /// Sets the specialties list.
    #[must_use]
    pub fn with_specialties(
        mut self,
        specialties: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.specialties = specialties.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the biography.
    #[must_use]
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    /// Sets the average rating.
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Sets the years of experience.
    #[must_use]
    pub fn with_experience_years(mut self, years: u32) -> Self {
        self.experience_years = years;
        self
    }

    /// Sets the working days.
    #[must_use]
    pub fn with_schedule(mut self, days: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.schedule = days.into_iter().map(Into::into).collect();
        self
    }
}

/// Lifecycle of a booked appointment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Booked but not yet confirmed by the salon.
    #[default]
    Pending,
    /// Confirmed by the salon.
    Confirmed,
    /// The customer was served.
    Completed,
    /// Called off by either side.
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A customer booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Customer's name.
    pub customer_name: String,
    /// Customer's phone number.
    pub customer_phone: String,
    /// Customer's email address.
    pub customer_email: String,
    /// Name of the booked service.
    pub service: String,
    /// Name of the assigned employee.
    pub employee: String,
    /// Calendar day of the booking.
    pub date: NaiveDate,
    /// Display time of the booking, e.g. "10:00 AM".
    pub time: String,
    /// Booked duration.
    pub duration_minutes: u32,
    /// Quoted price.
    pub price: f64,
    /// Where the booking is in its lifecycle.
    pub status: AppointmentStatus,
    /// Free-form staff notes.
    pub notes: Option<String>,
}

impl AppointmentRecord {
    /// Creates a pending appointment with a fresh identifier.
    #[must_use]
    pub fn new(
        customer_name: impl Into<String>,
        service: impl Into<String>,
        employee: impl Into<String>,
        date: NaiveDate,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: crate::utils::generate_uuid(),
            customer_name: customer_name.into(),
            customer_phone: String::new(),
            customer_email: String::new(),
            service: service.into(),
            employee: employee.into(),
            date,
            time: time.into(),
            duration_minutes: 0,
            price: 0.0,
            status: AppointmentStatus::Pending,
            notes: None,
        }
    }

    /// Sets the customer's contact details.
    #[must_use]
    pub fn with_contact(mut self, phone: impl Into<String>, email: impl Into<String>) -> Self {
        self.customer_phone = phone.into();
        self.customer_email = email.into();
        self
    }

    /// Sets the booked duration.
    #[must_use]
    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Sets the quoted price.
    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Sets the lifecycle status.
    #[must_use]
    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the staff notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
