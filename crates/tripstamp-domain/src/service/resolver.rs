//! Active trip resolution

use tripstamp_types::StationCode;

use crate::model::TripRecord;

/// The most recent trip for a plate and where it sits in the table it was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveTrip<'a> {
    pub position: usize,
    pub record: &'a TripRecord,
}

/// Pick the plate's most recently modified row.
///
/// Plates match exactly. Rows with equal `scan_date_time` are ordered by table
/// position and the later row wins.
pub fn resolve_active_trip<'a>(rows: &'a [TripRecord], plate: &str) -> Option<ActiveTrip<'a>> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.plate == plate)
        .max_by(|(pos_a, a), (pos_b, b)| {
            a.scan_date_time
                .cmp(&b.scan_date_time)
                .then(pos_a.cmp(pos_b))
        })
        .map(|(position, record)| ActiveTrip { position, record })
}

/// Highest populated slot of a row, scanning S4 down to S1.
///
/// Earlier empty slots are not treated as an error: the latest populated slot
/// is trusted as the trip's progress.
pub fn current_station_of(row: &TripRecord) -> Option<StationCode> {
    row.slots
        .iter()
        .rev()
        .find_map(|slot| slot.as_ref().map(|s| s.code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScanSlot;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn trip(plate: &str, started: NaiveDateTime, modified: NaiveDateTime) -> TripRecord {
        let mut row = TripRecord::start(plate, ScanSlot::new(StationCode::S1, "in", started.time()), started);
        row.scan_date_time = modified;
        row
    }

    #[test]
    fn test_no_rows_for_plate() {
        let rows = vec![trip("XY-999", at(8, 0), at(8, 0))];
        assert!(resolve_active_trip(&rows, "AB-123").is_none());
        assert!(resolve_active_trip(&[], "AB-123").is_none());
    }

    #[test]
    fn test_picks_latest_by_scan_date_time_not_position() {
        let rows = vec![
            trip("AB-123", at(8, 0), at(11, 0)),
            trip("AB-123", at(9, 0), at(9, 30)),
            trip("XY-999", at(12, 0), at(12, 0)),
        ];
        let active = resolve_active_trip(&rows, "AB-123").unwrap();
        assert_eq!(active.position, 0);
        assert_eq!(active.record.scan_date_time, at(11, 0));
    }

    #[test]
    fn test_tie_goes_to_later_row() {
        let rows = vec![
            trip("AB-123", at(8, 0), at(10, 0)),
            trip("AB-123", at(9, 0), at(10, 0)),
        ];
        assert_eq!(resolve_active_trip(&rows, "AB-123").unwrap().position, 1);
    }

    #[test]
    fn test_plate_match_is_exact() {
        let rows = vec![trip("ab-123", at(8, 0), at(8, 0)), trip("AB-123 ", at(8, 0), at(8, 0))];
        assert!(resolve_active_trip(&rows, "AB-123").is_none());
    }

    #[test]
    fn test_current_station_trusts_highest_slot() {
        let mut row = trip("AB-123", at(8, 0), at(8, 0));
        assert_eq!(current_station_of(&row), Some(StationCode::S1));

        // S2 missing but S3 present: progress is S3
        row.set_slot(ScanSlot::new(StationCode::S3, "load", at(8, 30).time()));
        assert_eq!(current_station_of(&row), Some(StationCode::S3));

        row.slots = [None, None, None, None];
        assert_eq!(current_station_of(&row), None);
    }
}
