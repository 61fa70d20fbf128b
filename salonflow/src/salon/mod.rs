//! Salon operations data: the service catalog, the staff roster, and the
//! appointment book, with the filtering and stats the dashboard needs.

mod records;
mod store;

pub use records::{AppointmentRecord, AppointmentStatus, EmployeeRecord, ServiceRecord};
pub use store::{
    AppointmentFilter, AppointmentStats, AppointmentStore, EmployeeStore, ServiceStore,
};
