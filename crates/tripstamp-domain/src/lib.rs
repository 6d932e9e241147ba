//! Domain layer: trip records, the station state machine, and store traits

pub mod clock;
pub mod model;
pub mod repository;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use model::{BillingRecord, ScanSlot, Station, TripRecord};
pub use repository::{BillingStore, TripStore};
