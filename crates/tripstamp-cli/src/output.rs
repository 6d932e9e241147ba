//! Output formatting module

use serde::Serialize;
use tripstamp_app::app::{ActiveTripView, ScanOutcome};
use tripstamp_domain::model::{DATE_TIME_FORMAT, STATIONS};
use tripstamp_domain::{BillingRecord, TripRecord};
use tripstamp_types::{OutputFormat, Result, StationCode};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

/// Slot time for the table, "-" when not scanned
fn slot_cell(trip: &TripRecord, code: StationCode) -> String {
    trip.slot(code)
        .map(|slot| slot.time_label())
        .unwrap_or_else(|| "-".to_string())
}

fn trip_line(trip: &TripRecord) -> String {
    format!(
        "{:<12} {:>8} {:>8} {:>8} {:>8}  {:<19}  {}",
        trip.plate,
        slot_cell(trip, StationCode::S1),
        slot_cell(trip, StationCode::S2),
        slot_cell(trip, StationCode::S3),
        slot_cell(trip, StationCode::S4),
        trip.scan_date_time.format(DATE_TIME_FORMAT),
        trip.reason
    )
}

fn trip_header() {
    println!(
        "{:<12} {:>8} {:>8} {:>8} {:>8}  {:<19}  Reason",
        "Plate", "S1", "S2", "S3", "S4", "Last scan"
    );
    println!("{}", "-".repeat(86));
}

pub fn output_scan(output_format: OutputFormat, outcome: &ScanOutcome) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(outcome);
    }

    let code = outcome.transition.station();
    let slot = outcome.record.slot(code);
    println!("{}", outcome.message());
    println!(
        "{} {} ({})",
        outcome.plate,
        code,
        slot.map(|s| s.station_name.as_str()).unwrap_or("")
    );
    println!();
    trip_header();
    println!("{}", trip_line(&outcome.record));
    Ok(())
}

pub fn output_trips(output_format: OutputFormat, trips: &[TripRecord]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(trips);
    }

    if trips.is_empty() {
        println!("No trips recorded");
        return Ok(());
    }
    trip_header();
    for trip in trips {
        println!("{}", trip_line(trip));
    }
    println!("\n{} trip(s)", trips.len());
    Ok(())
}

pub fn output_active_trip(output_format: OutputFormat, plate: &str, view: Option<&ActiveTripView>) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&view);
    }

    match view {
        None => println!("No trip for {}", plate),
        Some(view) => {
            let at = view
                .current_station
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("Active trip (sheet row {}), at {}", view.position + 2, at);
            println!();
            trip_header();
            println!("{}", trip_line(&view.record));
        }
    }
    Ok(())
}

pub fn output_stations(output_format: OutputFormat) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&STATIONS);
    }

    println!("{:<6} Station", "Code");
    println!("{}", "-".repeat(24));
    for station in &STATIONS {
        println!("{:<6} {}", station.code, station.display_name);
    }
    Ok(())
}

#[derive(Serialize)]
struct DecodedCode<'a> {
    code: &'a str,
    station: &'a str,
}

pub fn output_decoded(output_format: OutputFormat, code: &str, station: &str) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&DecodedCode { code, station });
    }
    println!("{} ({})", code, station);
    Ok(())
}

fn billing_line(record: &BillingRecord) -> String {
    format!(
        "{:<12} {:<24} {:>8}  {}",
        record.plate,
        record.reason,
        if record.time3.is_empty() { "-" } else { record.time3.as_str() },
        record.timestamp.format(DATE_TIME_FORMAT)
    )
}

fn billing_header() {
    println!("{:<12} {:<24} {:>8}  Timestamp", "Plate", "Reason", "Time3");
    println!("{}", "-".repeat(68));
}

pub fn output_billing_record(output_format: OutputFormat, record: &BillingRecord) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(record);
    }
    println!("Billing saved");
    billing_header();
    println!("{}", billing_line(record));
    Ok(())
}

pub fn output_billing(output_format: OutputFormat, records: &[BillingRecord]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(records);
    }

    if records.is_empty() {
        println!("No billing recorded");
        return Ok(());
    }
    billing_header();
    for record in records {
        println!("{}", billing_line(record));
    }
    Ok(())
}

#[derive(Serialize)]
struct BillingChoices<'a> {
    plates: &'a [String],
    reasons: &'a [String],
}

pub fn output_plates(output_format: OutputFormat, plates: &[String], reasons: &[String]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&BillingChoices { plates, reasons });
    }

    println!("Plates:");
    for plate in plates {
        println!("  {}", plate);
    }
    println!("\nReasons:");
    for reason in reasons {
        println!("  {}", reason);
    }
    Ok(())
}
