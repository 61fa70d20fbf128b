//! In-memory stores for the salon's services, staff, and appointments.
//!
//! The stores are plain owned collections mutated through `&mut self`; hosts
//! that share them across tasks wrap them in their own lock.

use crate::salon::records::{
    AppointmentRecord, AppointmentStatus, EmployeeRecord, ServiceRecord,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

/// The salon's service catalog.
#[derive(Debug, Clone, Default)]
pub struct ServiceStore {
    items: Vec<ServiceRecord>,
}

impl ServiceStore {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a service and returns its identifier.
    pub fn add(&mut self, record: ServiceRecord) -> Uuid {
        let id = record.id;
        self.items.push(record);
        id
    }

    /// Looks up a service by identifier.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&ServiceRecord> {
        self.items.iter().find(|service| service.id == id)
    }

    /// Looks up a service for editing.
    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut ServiceRecord> {
        self.items.iter_mut().find(|service| service.id == id)
    }

    /// Removes a service, returning it if it existed.
    pub fn remove(&mut self, id: Uuid) -> Option<ServiceRecord> {
        let index = self.items.iter().position(|service| service.id == id)?;
        Some(self.items.remove(index))
    }

    /// Flips a service between active and inactive, returning the new state.
    pub fn toggle_active(&mut self, id: Uuid) -> Option<bool> {
        let service = self.get_mut(id)?;
        service.is_active = !service.is_active;
        Some(service.is_active)
    }

    /// All services, in insertion order.
    #[must_use]
    pub fn all(&self) -> &[ServiceRecord] {
        &self.items
    }

    /// The services customers can currently book.
    #[must_use]
    pub fn active(&self) -> Vec<&ServiceRecord> {
        self.items.iter().filter(|service| service.is_active).collect()
    }

    /// Number of services in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The salon's staff roster.
#[derive(Debug, Clone, Default)]
pub struct EmployeeStore {
    items: Vec<EmployeeRecord>,
}

impl EmployeeStore {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an employee and returns their identifier.
    pub fn add(&mut self, record: EmployeeRecord) -> Uuid {
        let id = record.id;
        self.items.push(record);
        id
    }

    /// Looks up an employee by identifier.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&EmployeeRecord> {
        self.items.iter().find(|employee| employee.id == id)
    }

    /// Looks up an employee for editing.
    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut EmployeeRecord> {
        self.items.iter_mut().find(|employee| employee.id == id)
    }

    /// Removes an employee, returning them if they existed.
    pub fn remove(&mut self, id: Uuid) -> Option<EmployeeRecord> {
        let index = self.items.iter().position(|employee| employee.id == id)?;
        Some(self.items.remove(index))
    }

    /// Flips an employee between active and inactive, returning the new
    /// state.
    pub fn toggle_active(&mut self, id: Uuid) -> Option<bool> {
        let employee = self.get_mut(id)?;
        employee.is_active = !employee.is_active;
        Some(employee.is_active)
    }

    /// All employees, in insertion order.
    #[must_use]
    pub fn all(&self) -> &[EmployeeRecord] {
        &self.items
    }

    /// The employees currently taking bookings.
    #[must_use]
    pub fn active(&self) -> Vec<&EmployeeRecord> {
        self.items.iter().filter(|employee| employee.is_active).collect()
    }

    /// Number of employees on the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Criteria for narrowing the appointment book.
///
/// Unset criteria match everything; set criteria combine with AND. The text
/// search matches the customer name and service case-insensitively and the
/// phone number as an exact substring.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    search: Option<String>,
    date: Option<NaiveDate>,
    status: Option<AppointmentStatus>,
    employee: Option<String>,
}

impl AppointmentFilter {
    /// Creates a filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the search term to appear in the customer name, phone
    /// number, or service.
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Requires an exact calendar day.
    #[must_use]
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Requires a lifecycle status.
    #[must_use]
    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Requires an assigned employee, by exact name.
    #[must_use]
    pub fn by_employee(mut self, name: impl Into<String>) -> Self {
        self.employee = Some(name.into());
        self
    }

    fn matches(&self, appointment: &AppointmentRecord) -> bool {
        if let Some(term) = &self.search {
            let term_lower = term.to_lowercase();
            let hit = appointment
                .customer_name
                .to_lowercase()
                .contains(&term_lower)
                || appointment.customer_phone.contains(term.as_str())
                || appointment.service.to_lowercase().contains(&term_lower);
            if !hit {
                return false;
            }
        }
        if let Some(date) = self.date {
            if appointment.date != date {
                return false;
            }
        }
        if let Some(status) = self.status {
            if appointment.status != status {
                return false;
            }
        }
        if let Some(employee) = &self.employee {
            if appointment.employee != *employee {
                return false;
            }
        }
        true
    }
}

/// Headline numbers for the appointment dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AppointmentStats {
    /// All appointments on the book.
    pub total: usize,
    /// Appointments dated today.
    pub today: usize,
    /// Appointments in the confirmed state.
    pub confirmed: usize,
    /// Appointments in the pending state.
    pub pending: usize,
    /// Appointments in the completed state.
    pub completed: usize,
    /// Revenue from completed appointments.
    pub revenue: f64,
}

/// The salon's appointment book.
#[derive(Debug, Clone, Default)]
pub struct AppointmentStore {
    items: Vec<AppointmentRecord>,
}

impl AppointmentStore {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an appointment and returns its identifier.
    pub fn add(&mut self, record: AppointmentRecord) -> Uuid {
        let id = record.id;
        self.items.push(record);
        id
    }

    /// Looks up an appointment by identifier.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&AppointmentRecord> {
        self.items.iter().find(|appointment| appointment.id == id)
    }

    /// Removes an appointment, returning it if it existed.
    pub fn remove(&mut self, id: Uuid) -> Option<AppointmentRecord> {
        let index = self
            .items
            .iter()
            .position(|appointment| appointment.id == id)?;
        Some(self.items.remove(index))
    }

    /// Moves an appointment to a new lifecycle status. Returns false when
    /// the identifier is unknown.
    pub fn update_status(&mut self, id: Uuid, status: AppointmentStatus) -> bool {
        match self.items.iter_mut().find(|appointment| appointment.id == id) {
            Some(appointment) => {
                appointment.status = status;
                true
            }
            None => false,
        }
    }

    /// All appointments, in insertion order.
    #[must_use]
    pub fn all(&self) -> &[AppointmentRecord] {
        &self.items
    }

    /// The appointments matching a filter, in insertion order.
    #[must_use]
    pub fn filtered(&self, filter: &AppointmentFilter) -> Vec<&AppointmentRecord> {
        self.items
            .iter()
            .filter(|appointment| filter.matches(appointment))
            .collect()
    }

    /// The appointments on a calendar day.
    #[must_use]
    pub fn on_date(&self, date: NaiveDate) -> Vec<&AppointmentRecord> {
        self.items
            .iter()
            .filter(|appointment| appointment.date == date)
            .collect()
    }

    /// Today's appointments.
    #[must_use]
    pub fn today(&self) -> Vec<&AppointmentRecord> {
        self.on_date(Utc::now().date_naive())
    }

    /// Headline numbers across the whole book. Revenue counts completed
    /// appointments only.
    #[must_use]
    pub fn stats(&self) -> AppointmentStats {
        let today = Utc::now().date_naive();
        let count = |status: AppointmentStatus| {
            self.items
                .iter()
                .filter(|appointment| appointment.status == status)
                .count()
        };
        AppointmentStats {
            total: self.items.len(),
            today: self
                .items
                .iter()
                .filter(|appointment| appointment.date == today)
                .count(),
            confirmed: count(AppointmentStatus::Confirmed),
            pending: count(AppointmentStatus::Pending),
            completed: count(AppointmentStatus::Completed),
            revenue: self
                .items
                .iter()
                .filter(|appointment| appointment.status == AppointmentStatus::Completed)
                .map(|appointment| appointment.price)
                .sum(),
        }
    }

    /// Number of appointments on the book.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
