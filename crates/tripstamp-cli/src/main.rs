//! tripstamp - station timestamping for vehicle trips
//!
//! Records each vehicle's pass through the four site stations (S1..S4) on one
//! sheet row per trip, and billing annotations for the office.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = commands::execute(cli) {
        if e.is_rejection() {
            eprintln!("Warning: {}", e);
            std::process::exit(2);
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
