//! CSV export: the renderer and the dashboard's row formatters.

mod csv;
mod rows;

pub use csv::{render_csv, CsvDocument, CsvRow, ExportError};
pub use rows::{
    appointment_rows, daily_schedule_rows, employee_rows, export_appointments,
    export_daily_schedule, service_rows,
};
