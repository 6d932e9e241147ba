//! Error types for tripstamp

use thiserror::Error;

use crate::StationCode;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid UTC offset '{0}' (expected e.g. +07:00)")]
    InvalidOffset(String),
}

/// A scan the state machine refused. Nothing is written when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter a plate number before scanning")]
    MissingPlate,

    #[error("Enter a station code (S1 / S2 / S3 / S4)")]
    MissingStationCode,

    #[error("Unknown scan code: {0}")]
    UnknownStationCode(String),

    #[error("No active trip for this plate: scan S1 before {requested}")]
    MissingPriorStation { requested: StationCode },

    #[error("Cannot go back to {requested}: trip is already at {current}")]
    OutOfOrderBackward {
        requested: StationCode,
        current: StationCode,
    },

    #[error("Cannot skip to {requested}: trip is at {current}, next station is {expected}")]
    SkippedStation {
        requested: StationCode,
        current: StationCode,
        expected: StationCode,
    },

    #[error("{0} was already scanned for this trip")]
    DuplicateScan(StationCode),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scan rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Malformed row {row}: {message}")]
    MalformedRow { row: usize, message: String },

    #[error("Row position {position} is out of range ({len} rows)")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("Trip row for {plate} changed or disappeared before it could be updated; scan again")]
    StaleRowNotFound { plate: String },

    #[error("{matches} rows match the trip for {plate}; refusing to guess which one to update")]
    AmbiguousRow { plate: String, matches: usize },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Symbol decoder error: {0}")]
    Decode(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid image format: {0}")]
    InvalidImageFormat(String),

    #[error("Excel export error: {0}")]
    Excel(String),
}

impl Error {
    /// True for user-correctable scan rejections, as opposed to failures
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
