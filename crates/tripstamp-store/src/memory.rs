use std::cell::{Cell, RefCell};

use tracing::debug;
use tripstamp_domain::{BillingRecord, BillingStore, TripRecord, TripStore};
use tripstamp_types::{Error, Result};

type Interleave = Box<dyn FnOnce(&mut Vec<TripRecord>)>;

/// Trip table held in memory
#[derive(Default)]
pub struct MemoryTripStore {
    rows: RefCell<Vec<TripRecord>>,
    unavailable: Cell<bool>,
    interleave: RefCell<Option<Interleave>>,
}

impl MemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with rows in table order
    pub fn with_rows(rows: Vec<TripRecord>) -> Self {
        Self {
            rows: RefCell::new(rows),
            ..Self::default()
        }
    }

    /// Copy of the current table
    pub fn rows(&self) -> Vec<TripRecord> {
        self.rows.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }

    /// Make every call fail with `StoreUnavailable` until switched back
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    /// Run `edit` against the table right after the next read returns,
    /// as another writer would between our read and our write
    pub fn interleave_after_next_read(&self, edit: impl FnOnce(&mut Vec<TripRecord>) + 'static) {
        *self.interleave.borrow_mut() = Some(Box::new(edit));
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.get() {
            return Err(Error::StoreUnavailable("trip table is offline".to_string()));
        }
        Ok(())
    }
}

impl TripStore for MemoryTripStore {
    fn read_all(&self) -> Result<Vec<TripRecord>> {
        self.check_available()?;
        let snapshot = self.rows.borrow().clone();
        if let Some(edit) = self.interleave.borrow_mut().take() {
            edit(&mut *self.rows.borrow_mut());
            debug!("interleaved foreign edit after read");
        }
        Ok(snapshot)
    }

    fn append(&self, record: &TripRecord) -> Result<()> {
        self.check_available()?;
        self.rows.borrow_mut().push(record.clone());
        Ok(())
    }

    fn update(&self, position: usize, record: &TripRecord) -> Result<()> {
        self.check_available()?;
        let mut rows = self.rows.borrow_mut();
        let len = rows.len();
        let slot = rows
            .get_mut(position)
            .ok_or(Error::PositionOutOfRange { position, len })?;
        *slot = record.clone();
        Ok(())
    }
}

/// Billing table held in memory
#[derive(Default)]
pub struct MemoryBillingStore {
    rows: RefCell<Vec<BillingRecord>>,
    unavailable: Cell<bool>,
}

impl MemoryBillingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<BillingRecord> {
        self.rows.borrow().clone()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }
}

impl BillingStore for MemoryBillingStore {
    fn append(&self, record: &BillingRecord) -> Result<()> {
        if self.unavailable.get() {
            return Err(Error::StoreUnavailable("billing table is offline".to_string()));
        }
        self.rows.borrow_mut().push(record.clone());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<BillingRecord>> {
        if self.unavailable.get() {
            return Err(Error::StoreUnavailable("billing table is offline".to_string()));
        }
        Ok(self.rows.borrow().clone())
    }
}
