//! Configuration management for tripstamp
//!
//! Config stored at: ~/.config/tripstamp/config.json

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tripstamp_types::{CompletedTripPolicy, ConfigError, OutputFormat, Result};

use crate::app::hash_secret;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding trips.csv and billing.csv
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Site timezone as a fixed UTC offset (e.g. +07:00)
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Command that prints the symbol decoded from an image path appended to it
    #[serde(default = "default_decoder_command")]
    pub decoder_command: String,

    /// SHA-256 hex of the shared billing secret
    #[serde(default)]
    pub billing_secret_sha256: Option<String>,

    /// Reasons offered when recording billing
    #[serde(default = "default_billing_reasons")]
    pub billing_reasons: Vec<String>,

    /// Treatment of trips that already reached S4
    #[serde(default)]
    pub completed_trip_policy: CompletedTripPolicy,
}

fn default_utc_offset() -> String {
    "+07:00".to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_decoder_command() -> String {
    "zbarimg --raw --quiet".to_string()
}

fn default_billing_reasons() -> Vec<String> {
    vec![
        "Overweight".to_string(),
        "Waiting time".to_string(),
        "Reloading".to_string(),
        "Document correction".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            utc_offset: default_utc_offset(),
            output_format: default_output_format(),
            decoder_command: default_decoder_command(),
            billing_secret_sha256: None,
            billing_reasons: default_billing_reasons(),
            completed_trip_policy: CompletedTripPolicy::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("tripstamp");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("tripstamp");
        Ok(data_dir)
    }

    pub fn trip_sheet_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("trips.csv"))
    }

    pub fn billing_sheet_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("billing.csv"))
    }

    /// Parsed site offset
    pub fn offset(&self) -> Result<FixedOffset> {
        self.utc_offset
            .trim()
            .parse::<FixedOffset>()
            .map_err(|_| ConfigError::InvalidOffset(self.utc_offset.clone()).into())
    }

    /// Store the hash of a new billing secret
    pub fn set_billing_secret(&mut self, secret: &str) {
        self.billing_secret_sha256 = Some(hash_secret(secret));
    }

    /// Load config from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, or defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            config.offset()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tripstamp Configuration")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data dir:        {}",
            self.data_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "UTC offset:      {}", self.utc_offset)?;
        writeln!(f, "Output format:   {}", self.output_format)?;
        writeln!(f, "Decoder:         {}", self.decoder_command)?;
        writeln!(
            f,
            "Billing secret:  {}",
            if self.billing_secret_sha256.is_some() {
                "(set)"
            } else {
                "(not set)"
            }
        )?;
        writeln!(f, "Billing reasons: {}", self.billing_reasons.join(", "))?;
        writeln!(f, "Completed trips: {}", self.completed_trip_policy)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:     {}", path.display())?;
        }

        Ok(())
    }
}
