//! Billing annotations keyed to a plate's latest trip

use chrono::NaiveDateTime;
use tracing::debug;
use tripstamp_types::Result;

use crate::clock::whole_seconds;
use crate::model::{BillingRecord, TripRecord};
use crate::repository::{BillingStore, TripStore};
use crate::service::resolver::resolve_active_trip;

/// Build the annotation for `plate` from an already-read trip table.
///
/// No state requirement: a plate without trips gets an empty `time3`.
pub fn billing_snapshot(
    rows: &[TripRecord],
    plate: &str,
    reason: &str,
    now: NaiveDateTime,
) -> BillingRecord {
    let time3 = resolve_active_trip(rows, plate)
        .map(|active| active.record.time3_label())
        .unwrap_or_default();

    BillingRecord {
        plate: plate.to_string(),
        reason: reason.to_string(),
        time3,
        timestamp: whole_seconds(now),
    }
}

/// Read the trip table, snapshot the active trip's S3 time, and append the annotation
pub fn record_billing<T, B>(
    trips: &T,
    billing: &B,
    plate: &str,
    reason: &str,
    now: NaiveDateTime,
) -> Result<BillingRecord>
where
    T: TripStore + ?Sized,
    B: BillingStore + ?Sized,
{
    let rows = trips.read_all()?;
    let record = billing_snapshot(&rows, plate, reason, now);
    billing.append(&record)?;
    debug!(plate = %record.plate, time3 = %record.time3, "appended billing row");
    Ok(record)
}
