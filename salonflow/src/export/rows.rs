//! Row formatters and document builders for the dashboard's CSV exports.

use crate::export::csv::{CsvDocument, CsvRow, ExportError};
use crate::salon::{AppointmentRecord, EmployeeRecord, ServiceRecord};
use chrono::{NaiveDate, Utc};

fn money(price: f64) -> String {
    format!("${price}")
}

fn active_label(is_active: bool) -> String {
    if is_active { "Active" } else { "Inactive" }.to_string()
}

/// Full appointment rows for the filtered-data export.
#[must_use]
pub fn appointment_rows<'a>(
    appointments: impl IntoIterator<Item = &'a AppointmentRecord>,
) -> Vec<CsvRow> {
    appointments
        .into_iter()
        .map(|appointment| {
            CsvRow::from([
                ("Date".to_string(), appointment.date.to_string()),
                ("Time".to_string(), appointment.time.clone()),
                (
                    "Customer Name".to_string(),
                    appointment.customer_name.clone(),
                ),
                (
                    "Customer Phone".to_string(),
                    appointment.customer_phone.clone(),
                ),
                (
                    "Customer Email".to_string(),
                    appointment.customer_email.clone(),
                ),
                ("Service".to_string(), appointment.service.clone()),
                ("Employee".to_string(), appointment.employee.clone()),
                (
                    "Duration (minutes)".to_string(),
                    appointment.duration_minutes.to_string(),
                ),
                ("Price".to_string(), money(appointment.price)),
                ("Status".to_string(), appointment.status.to_string()),
                (
                    "Notes".to_string(),
                    appointment.notes.clone().unwrap_or_default(),
                ),
            ])
        })
        .collect()
}

/// Narrow appointment rows for the one-day schedule export. The date column
/// is omitted since every row shares the same day.
#[must_use]
pub fn daily_schedule_rows<'a>(
    appointments: impl IntoIterator<Item = &'a AppointmentRecord>,
) -> Vec<CsvRow> {
    appointments
        .into_iter()
        .map(|appointment| {
            CsvRow::from([
                ("Time".to_string(), appointment.time.clone()),
                (
                    "Customer Name".to_string(),
                    appointment.customer_name.clone(),
                ),
                (
                    "Customer Phone".to_string(),
                    appointment.customer_phone.clone(),
                ),
                ("Service".to_string(), appointment.service.clone()),
                ("Employee".to_string(), appointment.employee.clone()),
                (
                    "Duration (min)".to_string(),
                    appointment.duration_minutes.to_string(),
                ),
                ("Price".to_string(), money(appointment.price)),
                ("Status".to_string(), appointment.status.to_string()),
                (
                    "Notes".to_string(),
                    appointment.notes.clone().unwrap_or_default(),
                ),
            ])
        })
        .collect()
}

/// Service catalog rows.
#[must_use]
pub fn service_rows<'a>(services: impl IntoIterator<Item = &'a ServiceRecord>) -> Vec<CsvRow> {
    services
        .into_iter()
        .map(|service| {
            CsvRow::from([
                ("Service Name".to_string(), service.name.clone()),
                ("Category".to_string(), service.category.clone()),
                (
                    "Duration (minutes)".to_string(),
                    service.duration_minutes.to_string(),
                ),
                ("Price".to_string(), money(service.price)),
                ("Description".to_string(), service.description.clone()),
                ("Status".to_string(), active_label(service.is_active)),
            ])
        })
        .collect()
}

/// Staff roster rows.
#[must_use]
pub fn employee_rows<'a>(employees: impl IntoIterator<Item = &'a EmployeeRecord>) -> Vec<CsvRow> {
    employees
        .into_iter()
        .map(|employee| {
            CsvRow::from([
                ("Name".to_string(), employee.name.clone()),
                ("Role".to_string(), employee.role.clone()),
                ("Email".to_string(), employee.email.clone()),
                ("Phone".to_string(), employee.phone.clone()),
                ("Specialties".to_string(), employee.specialties.join("; ")),
                (
                    "Experience (years)".to_string(),
                    employee.experience_years.to_string(),
                ),
                ("Rating".to_string(), employee.rating.to_string()),
                ("Schedule".to_string(), employee.schedule.join(", ")),
                ("Status".to_string(), active_label(employee.is_active)),
            ])
        })
        .collect()
}

/// Builds the filtered-data export document.
///
/// The filename carries the date filter (or "all") and the export date:
/// `appointments_{filter}_{today}.csv`.
pub fn export_appointments<'a>(
    appointments: impl IntoIterator<Item = &'a AppointmentRecord>,
    selected_date: Option<NaiveDate>,
) -> Result<CsvDocument, ExportError> {
    let filter = selected_date.map_or_else(|| "all".to_string(), |date| date.to_string());
    let filename = format!("appointments_{}_{}.csv", filter, Utc::now().date_naive());
    CsvDocument::render(filename, &appointment_rows(appointments))
}

/// Builds the one-day schedule export document, named
/// `daily_appointments_{today}.csv`. The caller narrows the appointments to
/// the day first (see [`AppointmentStore::today`]).
///
/// [`AppointmentStore::today`]: crate::salon::AppointmentStore::today
pub fn export_daily_schedule<'a>(
    appointments: impl IntoIterator<Item = &'a AppointmentRecord>,
) -> Result<CsvDocument, ExportError> {
    let filename = format!("daily_appointments_{}.csv", Utc::now().date_naive());
    CsvDocument::render(filename, &daily_schedule_rows(appointments))
}
