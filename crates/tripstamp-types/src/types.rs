//! Station codes and scan policy types

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One of the four checkpoints a trip passes through, in scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StationCode {
    S1,
    S2,
    S3,
    S4,
}

impl StationCode {
    /// All stations in mandatory scan order
    pub const ALL: [StationCode; 4] = [
        StationCode::S1,
        StationCode::S2,
        StationCode::S3,
        StationCode::S4,
    ];

    /// Parse an exact code ("S1".."S4"). Callers normalize case and whitespace first.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "S1" => Some(StationCode::S1),
            "S2" => Some(StationCode::S2),
            "S3" => Some(StationCode::S3),
            "S4" => Some(StationCode::S4),
            _ => None,
        }
    }

    /// 1-based order in the station sequence
    pub fn order(self) -> u8 {
        match self {
            StationCode::S1 => 1,
            StationCode::S2 => 2,
            StationCode::S3 => 3,
            StationCode::S4 => 4,
        }
    }

    /// 0-based slot index on a trip record
    pub fn slot_index(self) -> usize {
        usize::from(self.order() - 1)
    }

    /// Station from a 1-based order
    pub fn from_order(order: u8) -> Option<Self> {
        match order {
            1 => Some(StationCode::S1),
            2 => Some(StationCode::S2),
            3 => Some(StationCode::S3),
            4 => Some(StationCode::S4),
            _ => None,
        }
    }

    /// The station that must follow this one, if any
    pub fn next(self) -> Option<Self> {
        Self::from_order(self.order() + 1)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StationCode::S1 => "S1",
            StationCode::S2 => "S2",
            StationCode::S3 => "S3",
            StationCode::S4 => "S4",
        }
    }
}

impl std::fmt::Display for StationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a trip that already reached S4 is treated by the next scan.
///
/// `Keep` evaluates the transition table against the completed row, so a
/// repeated S4 can still overwrite when the row carries a reason. `Reset` treats
/// a completed row as if the plate had no active trip. S1 starts a new trip
/// under both policies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletedTripPolicy {
    #[default]
    Keep,
    Reset,
}

impl std::fmt::Display for CompletedTripPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletedTripPolicy::Keep => write!(f, "keep"),
            CompletedTripPolicy::Reset => write!(f, "reset"),
        }
    }
}
