//! Trip record type definitions

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tripstamp_types::StationCode;

/// `ScanDateTime` column format
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Per-slot `Time` column format
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One station scan stored on a trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSlot {
    pub code: StationCode,
    pub station_name: String,
    pub time: NaiveTime,
}

impl ScanSlot {
    pub fn new(code: StationCode, station_name: impl Into<String>, time: NaiveTime) -> Self {
        Self {
            code,
            station_name: station_name.into(),
            time,
        }
    }

    /// Time formatted the way the sheet stores it
    pub fn time_label(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }
}

/// One vehicle's pass through S1..S4, stored as a single sheet row.
///
/// Slots are positional: slot `i` holds the scan for station `S(i+1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    pub plate: String,
    pub slots: [Option<ScanSlot>; 4],
    /// Free-text annotation; empty when none
    #[serde(default)]
    pub reason: String,
    /// Last modification time, the recency key
    pub scan_date_time: NaiveDateTime,
}

impl TripRecord {
    /// Fresh trip holding only its S1 scan
    pub fn start(plate: impl Into<String>, first: ScanSlot, at: NaiveDateTime) -> Self {
        Self {
            plate: plate.into(),
            slots: [Some(first), None, None, None],
            reason: String::new(),
            scan_date_time: at,
        }
    }

    pub fn slot(&self, code: StationCode) -> Option<&ScanSlot> {
        self.slots[code.slot_index()].as_ref()
    }

    /// Store `slot` at the position of its own station code
    pub fn set_slot(&mut self, slot: ScanSlot) {
        let index = slot.code.slot_index();
        self.slots[index] = Some(slot);
    }

    pub fn has_reason(&self) -> bool {
        !self.reason.trim().is_empty()
    }

    /// Slot-3 time as stored in the sheet, "" when S3 has not been scanned
    pub fn time3_label(&self) -> String {
        self.slot(StationCode::S3)
            .map(ScanSlot::time_label)
            .unwrap_or_default()
    }

    /// Whether `other` is the same sheet row as `self` as it was last read.
    ///
    /// Plate, S1 scan time and last-modified time together identify a row;
    /// any concurrent edit changes `scan_date_time` and breaks the match.
    pub fn same_row_as(&self, other: &TripRecord) -> bool {
        self.plate == other.plate
            && self.slots[0].as_ref().map(|s| s.time) == other.slots[0].as_ref().map(|s| s.time)
            && self.scan_date_time == other.scan_date_time
    }
}
