//! Store trait definitions for the external row tables
//!
//! Both tables behave like a shared spreadsheet: no transactions, no row locks,
//! last write wins. Positions are 0-based indices into the most recent
//! `read_all` and go stale as soon as another writer touches the table.

use tripstamp_types::Result;

use crate::model::{BillingRecord, TripRecord};

/// Ordered table of trip rows
pub trait TripStore {
    /// Read every row in store order
    fn read_all(&self) -> Result<Vec<TripRecord>>;

    /// Append a row at the end of the table
    fn append(&self, record: &TripRecord) -> Result<()>;

    /// Overwrite the row at `position`
    fn update(&self, position: usize, record: &TripRecord) -> Result<()>;
}

/// Append-only table of billing annotations
pub trait BillingStore {
    fn append(&self, record: &BillingRecord) -> Result<()>;

    fn read_all(&self) -> Result<Vec<BillingRecord>>;
}

impl<T: TripStore + ?Sized> TripStore for &T {
    fn read_all(&self) -> Result<Vec<TripRecord>> {
        (**self).read_all()
    }

    fn append(&self, record: &TripRecord) -> Result<()> {
        (**self).append(record)
    }

    fn update(&self, position: usize, record: &TripRecord) -> Result<()> {
        (**self).update(position, record)
    }
}

impl<T: BillingStore + ?Sized> BillingStore for &T {
    fn append(&self, record: &BillingRecord) -> Result<()> {
        (**self).append(record)
    }

    fn read_all(&self) -> Result<Vec<BillingRecord>> {
        (**self).read_all()
    }
}
