use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Billing annotation, append-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingRecord {
    pub plate: String,
    pub reason: String,
    /// Slot-3 time of the plate's active trip at billing time, "" when unavailable
    pub time3: String,
    pub timestamp: NaiveDateTime,
}
