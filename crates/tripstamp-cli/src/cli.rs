//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tripstamp_types::{CompletedTripPolicy, OutputFormat};

#[derive(Parser)]
#[command(name = "tripstamp")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Station timestamping for vehicle trips (S1 check-in to S4 weigh-out)")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Directory holding trips.csv and billing.csv. Uses config value if not specified.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logs on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a station scan for a plate
    Scan {
        /// License plate (e.g., "AB-123")
        plate: String,

        /// Station code (S1, S2, S3, S4)
        #[arg(required_unless_present = "image")]
        code: Option<String>,

        /// Read the station code from a camera frame instead
        #[arg(long, short = 'i', conflicts_with = "code")]
        image: Option<PathBuf>,

        /// Reason (S3 re-scan, carried to S4)
        #[arg(long, short = 'r', default_value = "")]
        reason: String,
    },

    /// Show the trip table, or one plate's active trip
    Trips {
        /// Only show the active trip of this plate
        #[arg(long, short = 'p')]
        plate: Option<String>,
    },

    /// List the station catalog
    Stations,

    /// Decode the station code from a camera frame
    Decode {
        /// Path to image file
        image: PathBuf,
    },

    /// Record a billing annotation for a plate
    Bill {
        /// License plate
        plate: String,

        /// Billing reason
        #[arg(long, short = 'r')]
        reason: String,

        /// Shared billing secret
        #[arg(long, short = 's')]
        secret: String,
    },

    /// Show recorded billing annotations
    Billing {
        /// Shared billing secret
        #[arg(long, short = 's')]
        secret: String,
    },

    /// List plates and reasons available for billing
    Plates {
        /// Shared billing secret
        #[arg(long, short = 's')]
        secret: String,
    },

    /// Export trips and billing to Excel
    Export {
        /// Output Excel file path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set site UTC offset (e.g., +07:00)
        #[arg(long)]
        set_utc_offset: Option<String>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set decoder command line (image path is appended)
        #[arg(long)]
        set_decoder: Option<String>,

        /// Set the shared billing secret (stored hashed)
        #[arg(long)]
        set_billing_secret: Option<String>,

        /// Add a billing reason
        #[arg(long)]
        add_reason: Vec<String>,

        /// Remove all billing reasons before adding
        #[arg(long)]
        clear_reasons: bool,

        /// Set how completed (S4) trips are treated
        #[arg(long)]
        set_completed_trip_policy: Option<CompletedTripPolicy>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_with_code() {
        let cli = Cli::try_parse_from(["tripstamp", "scan", "AB-123", "S3", "-r", "Reload"]).unwrap();
        match cli.command {
            Commands::Scan {
                plate,
                code,
                image,
                reason,
            } => {
                assert_eq!(plate, "AB-123");
                assert_eq!(code.as_deref(), Some("S3"));
                assert!(image.is_none());
                assert_eq!(reason, "Reload");
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_scan_needs_code_or_image() {
        assert!(Cli::try_parse_from(["tripstamp", "scan", "AB-123"]).is_err());
        assert!(Cli::try_parse_from(["tripstamp", "scan", "AB-123", "--image", "f.png"]).is_ok());
        assert!(Cli::try_parse_from(["tripstamp", "scan", "AB-123", "S1", "--image", "f.png"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["tripstamp", "trips", "--format", "json", "--data-dir", "/tmp/x", "-v"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_config_policy_value() {
        let cli = Cli::try_parse_from(["tripstamp", "config", "--set-completed-trip-policy", "reset"]).unwrap();
        match cli.command {
            Commands::Config {
                set_completed_trip_policy,
                ..
            } => assert_eq!(set_completed_trip_policy, Some(CompletedTripPolicy::Reset)),
            _ => panic!("expected config"),
        }
    }
}
