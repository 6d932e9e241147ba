//! Billing use case behind the shared secret

use tracing::info;
use tripstamp_domain::service::record_billing;
use tripstamp_domain::{BillingRecord, BillingStore, Clock, TripStore};
use tripstamp_types::{Result, ValidationError};

use super::auth::verify_secret;

/// Distinct plates seen in the trip table, sorted
pub fn billing_plates(trips: &dyn TripStore) -> Result<Vec<String>> {
    let mut plates: Vec<String> = trips
        .read_all()?
        .into_iter()
        .map(|row| row.plate)
        .filter(|plate| !plate.is_empty())
        .collect();
    plates.sort();
    plates.dedup();
    Ok(plates)
}

pub struct BillingService<'a> {
    trips: &'a dyn TripStore,
    billing: &'a dyn BillingStore,
    clock: &'a dyn Clock,
    reasons: Vec<String>,
}

impl<'a> BillingService<'a> {
    /// Open the billing screen; fails with `Unauthorized` on a wrong secret
    pub fn unlock(
        trips: &'a dyn TripStore,
        billing: &'a dyn BillingStore,
        clock: &'a dyn Clock,
        reasons: Vec<String>,
        configured_sha256: Option<&str>,
        secret: &str,
    ) -> Result<Self> {
        verify_secret(configured_sha256, secret)?;
        Ok(Self {
            trips,
            billing,
            clock,
            reasons,
        })
    }

    pub fn plates(&self) -> Result<Vec<String>> {
        billing_plates(self.trips)
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Append an annotation for `plate` with its latest trip's S3 time
    pub fn record(&self, plate: &str, reason: &str) -> Result<BillingRecord> {
        let plate = plate.trim();
        if plate.is_empty() {
            return Err(ValidationError::MissingPlate.into());
        }

        let record = record_billing(self.trips, self.billing, plate, reason.trim(), self.clock.now())?;
        info!(plate, reason = %record.reason, time3 = %record.time3, "billing recorded");
        Ok(record)
    }

    pub fn history(&self) -> Result<Vec<BillingRecord>> {
        self.billing.read_all()
    }
}
