//! Excel export of the trip and billing sheets

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tripstamp_domain::{BillingRecord, TripRecord};
use tripstamp_infra::persistence::{
    billing_row_fields, trip_row_fields, BILLING_HEADERS, TRIP_HEADERS,
};
use tripstamp_types::{Error, Result};

/// Write both tables to one workbook, a sheet each
pub fn export_to_excel(trips: &[TripRecord], billing: &[BillingRecord], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let trip_rows: Vec<Vec<String>> = trips.iter().map(trip_row_fields).collect();
    write_table(workbook.add_worksheet(), "Trips", TRIP_HEADERS, &trip_rows)?;

    let billing_rows: Vec<Vec<String>> = billing.iter().map(billing_row_fields).collect();
    write_table(workbook.add_worksheet(), "Billing", BILLING_HEADERS, &billing_rows)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_table(
    sheet: &mut Worksheet,
    name: &str,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<()> {
    sheet.set_name(name).map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    for (i, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            sheet
                .write_string((i + 1) as u32, col as u16, value)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }
    }

    sheet.autofit();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;
    use tripstamp_domain::ScanSlot;
    use tripstamp_types::StationCode;

    #[test]
    fn test_export_writes_workbook() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trips.xlsx");
        let at = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let trip = TripRecord::start("AB-123", ScanSlot::new(StationCode::S1, "รับรถเข้า", at.time()), at);
        let bill = BillingRecord {
            plate: "AB-123".to_string(),
            reason: "Overweight".to_string(),
            time3: String::new(),
            timestamp: at,
        };

        export_to_excel(&[trip], &[bill], &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_export_empty_tables() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        export_to_excel(&[], &[], &path).unwrap();
        assert!(path.exists());
    }
}
