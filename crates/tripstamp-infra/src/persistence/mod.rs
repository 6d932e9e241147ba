//! Persistence implementations
//!
//! CSV files laid out like the shared spreadsheet: one header row, then one
//! record per row. Every call goes back to the file.

mod csv_billing_sheet;
mod csv_trip_sheet;
mod sheet;

pub use csv_billing_sheet::{billing_row_fields, CsvBillingSheet, BILLING_HEADERS};
pub use csv_trip_sheet::{trip_row_fields, CsvTripSheet, TRIP_HEADERS};
