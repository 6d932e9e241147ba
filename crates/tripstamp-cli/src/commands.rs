//! Command handlers

use std::path::{Path, PathBuf};

use crate::cli::{Cli, Commands};
use crate::output::{
    output_active_trip, output_billing, output_billing_record, output_decoded, output_plates,
    output_scan, output_stations, output_trips,
};
use tripstamp_app::app::{
    billing_plates, decode_station_code, verify_secret, BillingService, ScanService,
};
use tripstamp_app::config::Config;
use tripstamp_app::export::export_to_excel;
use tripstamp_app::repository::{open_billing_sheet, open_decoder, open_trip_sheet, system_clock};
use tripstamp_domain::model::lookup_station_name;
use tripstamp_domain::{BillingStore, TripStore};
use tripstamp_infra::decoder::CommandDecoder;
use tripstamp_types::{CompletedTripPolicy, OutputFormat, Result};

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref dir) = cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Scan {
            plate,
            code,
            image,
            reason,
        } => cmd_scan(&config, output_format, plate, code.as_deref(), image.as_deref(), reason),

        Commands::Trips { plate } => cmd_trips(&config, output_format, plate.as_deref()),

        Commands::Stations => output_stations(output_format),

        Commands::Decode { image } => cmd_decode(&config, output_format, image),

        Commands::Bill {
            plate,
            reason,
            secret,
        } => cmd_bill(&config, output_format, plate, reason, secret),

        Commands::Billing { secret } => cmd_billing(&config, output_format, secret),

        Commands::Plates { secret } => cmd_plates(&config, output_format, secret),

        Commands::Export { output } => cmd_export(&config, output.clone()),

        Commands::Config {
            show,
            set_data_dir,
            set_utc_offset,
            set_output,
            set_decoder,
            set_billing_secret,
            add_reason,
            clear_reasons,
            set_completed_trip_policy,
            reset,
        } => cmd_config(ConfigChanges {
            show: *show,
            set_data_dir: set_data_dir.clone(),
            set_utc_offset: set_utc_offset.clone(),
            set_output: *set_output,
            set_decoder: set_decoder.clone(),
            set_billing_secret: set_billing_secret.clone(),
            add_reason: add_reason.clone(),
            clear_reasons: *clear_reasons,
            set_completed_trip_policy: *set_completed_trip_policy,
            reset: *reset,
        }),
    }
}

fn cmd_scan(
    config: &Config,
    output_format: OutputFormat,
    plate: &str,
    code: Option<&str>,
    image: Option<&Path>,
    reason: &str,
) -> Result<()> {
    let code = match (code, image) {
        (Some(code), _) => code.to_string(),
        (None, Some(image)) => {
            let decoder = open_decoder(config)?;
            decode_station_code(&decoder, image)?
        }
        // clap requires one of the two
        (None, None) => String::new(),
    };

    let sheet = open_trip_sheet(config)?;
    let clock = system_clock(config)?;
    let service = ScanService::new(&sheet, &clock, config.completed_trip_policy);

    let outcome = service.scan(plate, &code, reason)?;
    output_scan(output_format, &outcome)
}

fn cmd_trips(config: &Config, output_format: OutputFormat, plate: Option<&str>) -> Result<()> {
    let sheet = open_trip_sheet(config)?;
    let clock = system_clock(config)?;
    let service = ScanService::new(&sheet, &clock, config.completed_trip_policy);

    match plate {
        Some(plate) => {
            let view = service.active_trip(plate)?;
            output_active_trip(output_format, plate, view.as_ref())
        }
        None => output_trips(output_format, &service.table()?),
    }
}

fn cmd_decode(config: &Config, output_format: OutputFormat, image: &Path) -> Result<()> {
    let decoder = open_decoder(config)?;
    let code = decode_station_code(&decoder, image)?;
    output_decoded(output_format, &code, lookup_station_name(&code))
}

/// Open both sheets, check the billing secret, and run `action` on the unlocked service
fn unlock_billing<T>(
    config: &Config,
    secret: &str,
    action: impl FnOnce(&BillingService) -> Result<T>,
) -> Result<T> {
    let trips = open_trip_sheet(config)?;
    let billing = open_billing_sheet(config)?;
    let clock = system_clock(config)?;
    let service = BillingService::unlock(
        &trips,
        &billing,
        &clock,
        config.billing_reasons.clone(),
        config.billing_secret_sha256.as_deref(),
        secret,
    )?;
    action(&service)
}

fn cmd_bill(config: &Config, output_format: OutputFormat, plate: &str, reason: &str, secret: &str) -> Result<()> {
    let record = unlock_billing(config, secret, |service| {
        if !service.reasons().iter().any(|r| r == reason.trim()) {
            tracing::warn!(reason, "billing reason is not in the configured list");
        }
        service.record(plate, reason)
    })?;
    output_billing_record(output_format, &record)
}

fn cmd_billing(config: &Config, output_format: OutputFormat, secret: &str) -> Result<()> {
    let history = unlock_billing(config, secret, |service| service.history())?;
    output_billing(output_format, &history)
}

/// Plate picker; only the trip sheet is read
fn cmd_plates(config: &Config, output_format: OutputFormat, secret: &str) -> Result<()> {
    verify_secret(config.billing_secret_sha256.as_deref(), secret)?;
    let plates = billing_plates(&open_trip_sheet(config)?)?;
    output_plates(output_format, &plates, &config.billing_reasons)
}

fn cmd_export(config: &Config, output: Option<PathBuf>) -> Result<()> {
    let trips = open_trip_sheet(config)?.read_all()?;
    let billing = open_billing_sheet(config)?.read_all()?;

    let output_path = output.unwrap_or_else(|| PathBuf::from("tripstamp.xlsx"));
    export_to_excel(&trips, &billing, &output_path)?;

    println!(
        "Exported {} trip(s) and {} billing row(s) to {}",
        trips.len(),
        billing.len(),
        output_path.display()
    );
    Ok(())
}

struct ConfigChanges {
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_utc_offset: Option<String>,
    set_output: Option<OutputFormat>,
    set_decoder: Option<String>,
    set_billing_secret: Option<String>,
    add_reason: Vec<String>,
    clear_reasons: bool,
    set_completed_trip_policy: Option<CompletedTripPolicy>,
    reset: bool,
}

fn cmd_config(changes: ConfigChanges) -> Result<()> {
    if changes.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(dir) = changes.set_data_dir {
        config.data_dir = Some(dir);
        modified = true;
    }

    if let Some(offset) = changes.set_utc_offset {
        config.utc_offset = offset;
        config.offset()?;
        modified = true;
    }

    if let Some(output_format) = changes.set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(command) = changes.set_decoder {
        CommandDecoder::from_command_line(&command)?;
        config.decoder_command = command;
        modified = true;
    }

    if let Some(secret) = changes.set_billing_secret {
        config.set_billing_secret(&secret);
        modified = true;
    }

    if changes.clear_reasons {
        config.billing_reasons.clear();
        modified = true;
    }

    for reason in changes.add_reason {
        let reason = reason.trim().to_string();
        if !reason.is_empty() && !config.billing_reasons.contains(&reason) {
            config.billing_reasons.push(reason);
            modified = true;
        }
    }

    if let Some(policy) = changes.set_completed_trip_policy {
        config.completed_trip_policy = policy;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if changes.show || !modified {
        println!("{}", config);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tripstamp_types::Error;

    fn config_in(dir: &Path) -> Config {
        let mut config = Config {
            data_dir: Some(dir.to_path_buf()),
            ..Config::default()
        };
        config.set_billing_secret("office");
        config
    }

    #[test]
    fn test_plates_reads_only_the_trip_sheet() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        cmd_plates(&config, OutputFormat::Json, "office").unwrap();
        assert!(dir.path().join("trips.csv").exists());
        assert!(!dir.path().join("billing.csv").exists());
    }

    #[test]
    fn test_billing_commands_share_the_secret_check() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        for result in [
            cmd_plates(&config, OutputFormat::Json, "wrong"),
            cmd_billing(&config, OutputFormat::Json, "wrong"),
            cmd_bill(&config, OutputFormat::Json, "AB-123", "Overweight", "wrong"),
        ] {
            assert!(matches!(result, Err(Error::Unauthorized(_))));
        }

        cmd_bill(&config, OutputFormat::Json, "AB-123", "Overweight", "office").unwrap();
        let history = unlock_billing(&config, "office", |service| service.history()).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].plate, "AB-123");
    }
}
