//! Domain model types

pub mod billing;
pub mod station;
pub mod trip;

pub use billing::BillingRecord;
pub use station::{lookup_station_name, station_name, Station, STATIONS, UNKNOWN_STATION};
pub use trip::{ScanSlot, TripRecord, DATE_TIME_FORMAT, TIME_FORMAT};
