//! In-memory row tables
//!
//! Behave like the external sheet (positional rows, last write wins) and can
//! simulate another writer or an outage between calls.

mod memory;

pub use memory::{MemoryBillingStore, MemoryTripStore};
