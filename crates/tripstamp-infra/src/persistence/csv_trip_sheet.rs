//! Trip sheet stored as CSV
//!
//! Columns follow the station spreadsheet:
//! ทะเบียนรถ, Barcode..Barcode4, Station..Station4, Time..Time4, สาเหตุ, ScanDateTime

use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, NaiveTime};
use csv::StringRecord;
use tripstamp_domain::model::{DATE_TIME_FORMAT, TIME_FORMAT};
use tripstamp_domain::{ScanSlot, TripRecord, TripStore};
use tripstamp_types::{Error, Result, StationCode};

use super::sheet::{sheet_row, Sheet};

pub const TRIP_HEADERS: &[&str] = &[
    "ทะเบียนรถ",
    "Barcode",
    "Barcode2",
    "Barcode3",
    "Barcode4",
    "Station",
    "Station2",
    "Station3",
    "Station4",
    "Time",
    "Time2",
    "Time3",
    "Time4",
    "สาเหตุ",
    "ScanDateTime",
];

const PLATE: usize = 0;
const BARCODE: usize = 1;
const STATION: usize = 5;
const TIME: usize = 9;
const REASON: usize = 13;
const SCAN_DATE_TIME: usize = 14;

/// CSV-backed implementation of TripStore
pub struct CsvTripSheet {
    sheet: Sheet,
}

impl CsvTripSheet {
    /// Open or create the sheet at `path`
    pub fn open(path: PathBuf) -> Result<Self> {
        Ok(Self {
            sheet: Sheet::open(path, TRIP_HEADERS)?,
        })
    }

    pub fn path(&self) -> &Path {
        self.sheet.path()
    }
}

impl TripStore for CsvTripSheet {
    fn read_all(&self) -> Result<Vec<TripRecord>> {
        self.sheet
            .read_records()?
            .iter()
            .enumerate()
            .map(|(position, record)| parse_trip(record, sheet_row(position)))
            .collect()
    }

    fn append(&self, record: &TripRecord) -> Result<()> {
        self.sheet.append_record(&trip_row_fields(record))
    }

    fn update(&self, position: usize, record: &TripRecord) -> Result<()> {
        self.sheet.replace_record(position, &trip_row_fields(record))
    }
}

/// Cells of one trip row in `TRIP_HEADERS` order
pub fn trip_row_fields(trip: &TripRecord) -> Vec<String> {
    let mut fields = vec![String::new(); TRIP_HEADERS.len()];
    fields[PLATE] = trip.plate.clone();
    for (i, slot) in trip.slots.iter().enumerate() {
        if let Some(slot) = slot {
            fields[BARCODE + i] = slot.code.to_string();
            fields[STATION + i] = slot.station_name.clone();
            fields[TIME + i] = slot.time_label();
        }
    }
    fields[REASON] = trip.reason.clone();
    fields[SCAN_DATE_TIME] = trip.scan_date_time.format(DATE_TIME_FORMAT).to_string();
    fields
}

fn parse_trip(record: &StringRecord, row: usize) -> Result<TripRecord> {
    let cell = |index: usize| record.get(index).unwrap_or("").trim();

    let mut slots: [Option<ScanSlot>; 4] = [None, None, None, None];
    for (i, slot) in slots.iter_mut().enumerate() {
        let code = cell(BARCODE + i);
        if code.is_empty() {
            continue;
        }
        let code = StationCode::parse(code).ok_or_else(|| Error::MalformedRow {
            row,
            message: format!("unknown station code '{}' in {}", code, TRIP_HEADERS[BARCODE + i]),
        })?;
        let time = NaiveTime::parse_from_str(cell(TIME + i), TIME_FORMAT).map_err(|_| {
            Error::MalformedRow {
                row,
                message: format!("invalid time '{}' in {}", cell(TIME + i), TRIP_HEADERS[TIME + i]),
            }
        })?;
        *slot = Some(ScanSlot::new(code, cell(STATION + i), time));
    }

    let scan_date_time = NaiveDateTime::parse_from_str(cell(SCAN_DATE_TIME), DATE_TIME_FORMAT)
        .map_err(|_| Error::MalformedRow {
            row,
            message: format!("invalid ScanDateTime '{}'", cell(SCAN_DATE_TIME)),
        })?;

    Ok(TripRecord {
        plate: cell(PLATE).to_string(),
        slots,
        reason: cell(REASON).to_string(),
        scan_date_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::tempdir;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_row_layout_matches_spreadsheet() {
        let dir = tempdir().unwrap();
        let sheet = CsvTripSheet::open(dir.path().join("trips.csv")).unwrap();
        let trip = TripRecord::start("AB-123", ScanSlot::new(StationCode::S1, "รับรถเข้า", at(9, 0, 0).time()), at(9, 0, 0));
        sheet.append(&trip).unwrap();

        let content = fs::read_to_string(sheet.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], TRIP_HEADERS.join(","));
        assert_eq!(lines[1], "AB-123,S1,,,,รับรถเข้า,,,,09:00:00,,,,,2025-03-01 09:00:00");
    }

    #[test]
    fn test_update_rewrites_single_row() {
        let dir = tempdir().unwrap();
        let sheet = CsvTripSheet::open(dir.path().join("trips.csv")).unwrap();
        let first = TripRecord::start("AB-123", ScanSlot::new(StationCode::S1, "in", at(9, 0, 0).time()), at(9, 0, 0));
        let other = TripRecord::start("XY-999", ScanSlot::new(StationCode::S1, "in", at(9, 5, 0).time()), at(9, 5, 0));
        sheet.append(&first).unwrap();
        sheet.append(&other).unwrap();

        let mut updated = first.clone();
        updated.set_slot(ScanSlot::new(StationCode::S2, "weigh", at(9, 10, 0).time()));
        updated.reason = "reason, with comma".to_string();
        updated.scan_date_time = at(9, 10, 0);
        sheet.update(0, &updated).unwrap();

        let rows = sheet.read_all().unwrap();
        assert_eq!(rows, vec![updated, other]);
    }

    #[test]
    fn test_malformed_row_reports_sheet_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trips.csv");
        let sheet = CsvTripSheet::open(path.clone()).unwrap();
        let good = TripRecord::start("AB-123", ScanSlot::new(StationCode::S1, "in", at(9, 0, 0).time()), at(9, 0, 0));
        sheet.append(&good).unwrap();
        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str("ZZ-1,S7,,,,x,,,,09:00:00,,,,,2025-03-01 09:00:00\n");
        fs::write(&path, content).unwrap();

        let err = sheet.read_all().unwrap_err();
        assert!(matches!(err, Error::MalformedRow { row: 3, .. }));
    }

    #[test]
    fn test_row_without_scans_has_empty_slots() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trips.csv");
        let sheet = CsvTripSheet::open(path.clone()).unwrap();
        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str("AB-123,,,,,,,,,,,,,,2025-03-01 08:00:00\n");
        fs::write(&path, content).unwrap();

        let rows = sheet.read_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].slots.iter().all(Option::is_none));
    }
}
