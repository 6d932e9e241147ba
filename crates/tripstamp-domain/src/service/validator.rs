//! Scan validation: the station state machine

use serde::Serialize;
use tripstamp_types::{CompletedTripPolicy, StationCode, ValidationError};

use crate::model::TripRecord;
use crate::service::resolver::current_station_of;

/// Where a plate's active trip stands before a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TripState {
    NoActiveTrip,
    AtStation(StationCode),
}

impl TripState {
    /// State of a resolved row under the given completed-trip policy
    pub fn of(active: Option<&TripRecord>, policy: CompletedTripPolicy) -> Self {
        match active.and_then(current_station_of) {
            None => TripState::NoActiveTrip,
            Some(StationCode::S4) if policy == CompletedTripPolicy::Reset => TripState::NoActiveTrip,
            Some(code) => TripState::AtStation(code),
        }
    }
}

/// An accepted scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Transition {
    /// S1: append a brand-new trip row
    StartTrip,
    /// Next station in sequence
    Advance(StationCode),
    /// Repeat of the current station allowed by a reason
    Overwrite(StationCode),
}

impl Transition {
    /// Station whose slot this transition writes
    pub fn station(&self) -> StationCode {
        match self {
            Transition::StartTrip => StationCode::S1,
            Transition::Advance(code) | Transition::Overwrite(code) => *code,
        }
    }
}

/// Apply the transition table, first matching rule wins:
///
/// 1. S1 always starts a new trip, whatever the current state.
/// 2. Anything else needs an active trip.
/// 3. No going backwards.
/// 4. No skipping: only the station right after the current one advances.
/// 5. Repeating the current station is a duplicate, except S3 with a reason
///    given now, or S4 on a row that already carries a reason.
/// 6. Otherwise it is the next station.
pub fn check_transition(
    state: TripState,
    requested: StationCode,
    reason_provided: bool,
    row_has_reason: bool,
) -> Result<Transition, ValidationError> {
    if requested == StationCode::S1 {
        return Ok(Transition::StartTrip);
    }

    let current = match state {
        TripState::NoActiveTrip => {
            return Err(ValidationError::MissingPriorStation { requested });
        }
        TripState::AtStation(current) => current,
    };

    if requested < current {
        return Err(ValidationError::OutOfOrderBackward { requested, current });
    }

    if let Some(expected) = current.next() {
        if requested > expected {
            return Err(ValidationError::SkippedStation {
                requested,
                current,
                expected,
            });
        }
    }

    if requested == current {
        let overwrite_allowed = match requested {
            StationCode::S3 => reason_provided,
            StationCode::S4 => row_has_reason,
            _ => false,
        };
        return if overwrite_allowed {
            Ok(Transition::Overwrite(requested))
        } else {
            Err(ValidationError::DuplicateScan(requested))
        };
    }

    Ok(Transition::Advance(requested))
}

/// Validate a normalized scan code against the plate's active trip
pub fn validate_scan(
    active: Option<&TripRecord>,
    code: &str,
    reason: &str,
    policy: CompletedTripPolicy,
) -> Result<Transition, ValidationError> {
    let requested = StationCode::parse(code)
        .ok_or_else(|| ValidationError::UnknownStationCode(code.to_string()))?;
    let state = TripState::of(active, policy);
    let row_has_reason = active.map(TripRecord::has_reason).unwrap_or(false);

    check_transition(state, requested, !reason.trim().is_empty(), row_has_reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScanSlot;
    use chrono::{NaiveDate, NaiveDateTime};
    use StationCode::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    /// Row that has reached `upto`, every earlier slot populated
    fn row_at(upto: StationCode, reason: &str) -> TripRecord {
        let mut row = TripRecord::start("AB-123", ScanSlot::new(S1, "in", at(8, 0).time()), at(8, 0));
        for code in StationCode::ALL.into_iter().filter(|c| *c > S1 && *c <= upto) {
            row.set_slot(ScanSlot::new(code, "x", at(8, code.order() as u32).time()));
        }
        row.reason = reason.to_string();
        row
    }

    #[test]
    fn test_no_active_trip_only_accepts_s1() {
        for code in StationCode::ALL {
            let result = check_transition(TripState::NoActiveTrip, code, false, false);
            if code == S1 {
                assert_eq!(result, Ok(Transition::StartTrip));
            } else {
                assert_eq!(result, Err(ValidationError::MissingPriorStation { requested: code }));
            }
        }
    }

    #[test]
    fn test_forward_backward_and_skip_from_every_station() {
        for current in [S1, S2, S3] {
            let state = TripState::AtStation(current);
            for requested in [S2, S3, S4] {
                let result = check_transition(state, requested, false, false);
                if requested.order() == current.order() + 1 {
                    assert_eq!(result, Ok(Transition::Advance(requested)));
                } else if requested < current {
                    assert_eq!(
                        result,
                        Err(ValidationError::OutOfOrderBackward { requested, current })
                    );
                } else if requested.order() > current.order() + 1 {
                    assert_eq!(
                        result,
                        Err(ValidationError::SkippedStation {
                            requested,
                            current,
                            expected: current.next().unwrap(),
                        })
                    );
                }
            }
        }
    }

    #[test]
    fn test_s1_always_starts_new_trip() {
        for current in StationCode::ALL {
            for reason in [false, true] {
                assert_eq!(
                    check_transition(TripState::AtStation(current), S1, reason, reason),
                    Ok(Transition::StartTrip)
                );
            }
        }
    }

    #[test]
    fn test_duplicates_rejected_without_qualifying_reason() {
        assert_eq!(
            check_transition(TripState::AtStation(S2), S2, true, true),
            Err(ValidationError::DuplicateScan(S2))
        );
        assert_eq!(
            check_transition(TripState::AtStation(S3), S3, false, true),
            Err(ValidationError::DuplicateScan(S3))
        );
        assert_eq!(
            check_transition(TripState::AtStation(S4), S4, true, false),
            Err(ValidationError::DuplicateScan(S4))
        );
    }

    #[test]
    fn test_duplicate_exceptions_overwrite() {
        assert_eq!(
            check_transition(TripState::AtStation(S3), S3, true, false),
            Ok(Transition::Overwrite(S3))
        );
        assert_eq!(
            check_transition(TripState::AtStation(S4), S4, false, true),
            Ok(Transition::Overwrite(S4))
        );
    }

    #[test]
    fn test_completed_trip_backward_scan() {
        assert_eq!(
            check_transition(TripState::AtStation(S4), S2, false, false),
            Err(ValidationError::OutOfOrderBackward {
                requested: S2,
                current: S4
            })
        );
    }

    #[test]
    fn test_unknown_code_independent_of_state() {
        for active in [None, Some(row_at(S2, ""))] {
            assert_eq!(
                validate_scan(active.as_ref(), "S5", "", CompletedTripPolicy::Keep),
                Err(ValidationError::UnknownStationCode("S5".to_string()))
            );
        }
    }

    #[test]
    fn test_validate_scan_uses_row_reason_for_s4() {
        let with_reason = row_at(S4, "late truck");
        let without_reason = row_at(S4, "");
        assert_eq!(
            validate_scan(Some(&with_reason), "S4", "", CompletedTripPolicy::Keep),
            Ok(Transition::Overwrite(S4))
        );
        assert_eq!(
            validate_scan(Some(&without_reason), "S4", "", CompletedTripPolicy::Keep),
            Err(ValidationError::DuplicateScan(S4))
        );
    }

    #[test]
    fn test_whitespace_reason_does_not_unlock_s3() {
        let row = row_at(S3, "");
        assert_eq!(
            validate_scan(Some(&row), "S3", "  ", CompletedTripPolicy::Keep),
            Err(ValidationError::DuplicateScan(S3))
        );
    }

    #[test]
    fn test_completed_trip_policy_differences() {
        let completed = row_at(S4, "weighbridge retry");

        // S1 after S4 starts a new trip under both policies
        for policy in [CompletedTripPolicy::Keep, CompletedTripPolicy::Reset] {
            assert_eq!(
                validate_scan(Some(&completed), "S1", "", policy),
                Ok(Transition::StartTrip)
            );
        }

        // Keep: the finished row still constrains the next scan
        assert_eq!(
            validate_scan(Some(&completed), "S2", "", CompletedTripPolicy::Keep),
            Err(ValidationError::OutOfOrderBackward {
                requested: S2,
                current: S4
            })
        );
        assert_eq!(
            validate_scan(Some(&completed), "S4", "", CompletedTripPolicy::Keep),
            Ok(Transition::Overwrite(S4))
        );

        // Reset: a finished row counts as no active trip
        assert_eq!(
            validate_scan(Some(&completed), "S2", "", CompletedTripPolicy::Reset),
            Err(ValidationError::MissingPriorStation { requested: S2 })
        );
        assert_eq!(
            validate_scan(Some(&completed), "S4", "", CompletedTripPolicy::Reset),
            Err(ValidationError::MissingPriorStation { requested: S4 })
        );
    }

    #[test]
    fn test_state_of_row_without_slots() {
        let mut row = row_at(S1, "");
        row.slots = [None, None, None, None];
        assert_eq!(TripState::of(Some(&row), CompletedTripPolicy::Keep), TripState::NoActiveTrip);
    }
}
