//! Turning an accepted scan into a single row write

use chrono::NaiveDateTime;
use tracing::debug;
use tripstamp_types::{Error, Result, StationCode, ValidationError};

use crate::clock::whole_seconds;
use crate::model::{ScanSlot, TripRecord};
use crate::repository::TripStore;
use crate::service::validator::Transition;

/// The write an accepted scan produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// New trip row for an S1 scan
    Append(TripRecord),
    /// Amended copy of the resolved row.
    ///
    /// `original` is the row as it was read; its position is looked up again
    /// right before writing.
    Update {
        original: TripRecord,
        updated: TripRecord,
    },
}

impl WriteOp {
    /// The row as it will look once written
    pub fn record(&self) -> &TripRecord {
        match self {
            WriteOp::Append(record) => record,
            WriteOp::Update { updated, .. } => updated,
        }
    }
}

/// Build the write for an accepted transition
pub fn apply_scan(
    plate: &str,
    resolved: Option<&TripRecord>,
    transition: Transition,
    station_name: &str,
    reason: &str,
    now: NaiveDateTime,
) -> std::result::Result<WriteOp, ValidationError> {
    let now = whole_seconds(now);
    let code = transition.station();
    let slot = ScanSlot::new(code, station_name, now.time());

    if transition == Transition::StartTrip {
        return Ok(WriteOp::Append(TripRecord::start(plate, slot, now)));
    }

    let original = resolved.ok_or(ValidationError::MissingPriorStation { requested: code })?;
    let mut updated = original.clone();
    updated.set_slot(slot);
    updated.scan_date_time = now;
    if code == StationCode::S3 {
        updated.reason = reason.trim().to_string();
    }

    Ok(WriteOp::Update {
        original: original.clone(),
        updated,
    })
}

/// Find the one row in a fresh read that is still `original`
pub fn locate_row(rows: &[TripRecord], original: &TripRecord) -> Result<usize> {
    let mut matches = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.same_row_as(original))
        .map(|(position, _)| position);

    match (matches.next(), matches.count()) {
        (Some(position), 0) => Ok(position),
        (None, _) => Err(Error::StaleRowNotFound {
            plate: original.plate.clone(),
        }),
        (Some(_), extra) => Err(Error::AmbiguousRow {
            plate: original.plate.clone(),
            matches: extra + 1,
        }),
    }
}

/// Perform the write against the store, re-reading the table for updates.
///
/// Returns the record as written. Store errors propagate untouched.
pub fn commit<S: TripStore + ?Sized>(store: &S, op: &WriteOp) -> Result<TripRecord> {
    match op {
        WriteOp::Append(record) => {
            store.append(record)?;
            debug!(plate = %record.plate, "appended trip row");
            Ok(record.clone())
        }
        WriteOp::Update { original, updated } => {
            let rows = store.read_all()?;
            let position = locate_row(&rows, original)?;
            store.update(position, updated)?;
            debug!(plate = %updated.plate, position, "updated trip row");
            Ok(updated.clone())
        }
    }
}
