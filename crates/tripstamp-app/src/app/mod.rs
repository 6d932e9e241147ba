//! Use cases driven by the CLI

pub mod auth;
pub mod billing_service;
pub mod decode;
pub mod scan_service;

pub use auth::{hash_secret, verify_secret};
pub use billing_service::{billing_plates, BillingService};
pub use decode::decode_station_code;
pub use scan_service::{ActiveTripView, ScanOutcome, ScanService};
