//! Domain services: the trip state machine and billing annotations

pub mod billing;
pub mod mutator;
pub mod resolver;
pub mod validator;

pub use billing::{billing_snapshot, record_billing};
pub use mutator::{apply_scan, commit, locate_row, WriteOp};
pub use resolver::{current_station_of, resolve_active_trip, ActiveTrip};
pub use validator::{check_transition, validate_scan, Transition, TripState};
