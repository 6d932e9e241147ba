//! Repository adapters for persistence layer

use tripstamp_domain::SystemClock;
use tripstamp_infra::decoder::CommandDecoder;
use tripstamp_infra::persistence::{CsvBillingSheet, CsvTripSheet};
use tripstamp_types::Result;

use crate::config::Config;

/// Open the CSV trip sheet under the configured data dir
pub fn open_trip_sheet(config: &Config) -> Result<CsvTripSheet> {
    CsvTripSheet::open(config.trip_sheet_path()?)
}

/// Open the CSV billing sheet under the configured data dir
pub fn open_billing_sheet(config: &Config) -> Result<CsvBillingSheet> {
    CsvBillingSheet::open(config.billing_sheet_path()?)
}

/// Decoder built from the configured command line
pub fn open_decoder(config: &Config) -> Result<CommandDecoder> {
    CommandDecoder::from_command_line(&config.decoder_command)
}

/// Wall clock in the site's offset
pub fn system_clock(config: &Config) -> Result<SystemClock> {
    Ok(SystemClock::new(config.offset()?))
}
