//! Billing sheet stored as CSV

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use csv::StringRecord;
use tripstamp_domain::model::DATE_TIME_FORMAT;
use tripstamp_domain::{BillingRecord, BillingStore};
use tripstamp_types::{Error, Result};

use super::sheet::{sheet_row, Sheet};

pub const BILLING_HEADERS: &[&str] = &["ทะเบียนรถ", "สาเหตุ", "Time3", "Timestamp"];

/// CSV-backed implementation of BillingStore
pub struct CsvBillingSheet {
    sheet: Sheet,
}

impl CsvBillingSheet {
    pub fn open(path: PathBuf) -> Result<Self> {
        Ok(Self {
            sheet: Sheet::open(path, BILLING_HEADERS)?,
        })
    }

    pub fn path(&self) -> &Path {
        self.sheet.path()
    }
}

impl BillingStore for CsvBillingSheet {
    fn append(&self, record: &BillingRecord) -> Result<()> {
        self.sheet.append_record(&billing_row_fields(record))
    }

    fn read_all(&self) -> Result<Vec<BillingRecord>> {
        self.sheet
            .read_records()?
            .iter()
            .enumerate()
            .map(|(position, record)| parse_billing(record, sheet_row(position)))
            .collect()
    }
}

/// Cells of one billing row in `BILLING_HEADERS` order
pub fn billing_row_fields(record: &BillingRecord) -> Vec<String> {
    vec![
        record.plate.clone(),
        record.reason.clone(),
        record.time3.clone(),
        record.timestamp.format(DATE_TIME_FORMAT).to_string(),
    ]
}

fn parse_billing(record: &StringRecord, row: usize) -> Result<BillingRecord> {
    let cell = |index: usize| record.get(index).unwrap_or("").trim();
    let timestamp = NaiveDateTime::parse_from_str(cell(3), DATE_TIME_FORMAT).map_err(|_| {
        Error::MalformedRow {
            row,
            message: format!("invalid Timestamp '{}'", cell(3)),
        }
    })?;

    Ok(BillingRecord {
        plate: cell(0).to_string(),
        reason: cell(1).to_string(),
        time3: cell(2).to_string(),
        timestamp,
    })
}
