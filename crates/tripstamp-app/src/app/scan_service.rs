//! Scan use case: one station scan from input to row write

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, warn};
use tripstamp_domain::model::station_name;
use tripstamp_domain::service::{
    apply_scan, commit, current_station_of, resolve_active_trip, validate_scan, Transition,
};
use tripstamp_domain::{Clock, TripRecord, TripStore};
use tripstamp_types::{CompletedTripPolicy, Result, StationCode, ValidationError};

/// Result of an accepted scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub plate: String,
    pub transition: Transition,
    pub record: TripRecord,
    pub scanned_at: NaiveDateTime,
}

impl ScanOutcome {
    /// Confirmation line shown to the operator
    pub fn message(&self) -> String {
        format!("Saved @ {}", self.scanned_at.format("%d/%m/%Y %H:%M"))
    }
}

/// A plate's latest trip as seen by the operator
#[derive(Debug, Clone, Serialize)]
pub struct ActiveTripView {
    pub position: usize,
    pub current_station: Option<StationCode>,
    pub record: TripRecord,
}

pub struct ScanService<'a> {
    store: &'a dyn TripStore,
    clock: &'a dyn Clock,
    policy: CompletedTripPolicy,
}

impl<'a> ScanService<'a> {
    pub fn new(store: &'a dyn TripStore, clock: &'a dyn Clock, policy: CompletedTripPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// Validate and record a scan.
    ///
    /// Rejections come back as `Error::Validation` and leave the table untouched.
    pub fn scan(&self, plate: &str, code: &str, reason: &str) -> Result<ScanOutcome> {
        let plate = plate.trim();
        if plate.is_empty() {
            return Err(ValidationError::MissingPlate.into());
        }
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(ValidationError::MissingStationCode.into());
        }

        let rows = self.store.read_all()?;
        let active = resolve_active_trip(&rows, plate).map(|a| a.record);

        let transition = match validate_scan(active, &code, reason, self.policy) {
            Ok(transition) => transition,
            Err(e) => {
                warn!(plate, code = %code, error = %e, "scan rejected");
                return Err(e.into());
            }
        };

        let now = self.clock.now();
        let name = station_name(transition.station());
        let op = apply_scan(plate, active, transition, name, reason, now)?;
        let record = commit(self.store, &op)?;

        info!(plate, code = %code, transition = ?transition, "scan recorded");
        Ok(ScanOutcome {
            plate: plate.to_string(),
            transition,
            record,
            scanned_at: now,
        })
    }

    /// The full trip table as stored
    pub fn table(&self) -> Result<Vec<TripRecord>> {
        self.store.read_all()
    }

    /// Latest trip for `plate`, if any
    pub fn active_trip(&self, plate: &str) -> Result<Option<ActiveTripView>> {
        let rows = self.store.read_all()?;
        Ok(resolve_active_trip(&rows, plate.trim()).map(|active| ActiveTripView {
            position: active.position,
            current_station: current_station_of(active.record),
            record: active.record.clone(),
        }))
    }
}
