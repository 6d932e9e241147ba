//! Station catalog

use serde::Serialize;
use tripstamp_types::StationCode;

/// Label returned for codes outside the catalog
pub const UNKNOWN_STATION: &str = "Unknown Station";

/// A checkpoint with its display label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Station {
    pub code: StationCode,
    pub display_name: &'static str,
}

/// The fixed checkpoint sequence
pub const STATIONS: [Station; 4] = [
    Station {
        code: StationCode::S1,
        display_name: "รับรถเข้า",
    },
    Station {
        code: StationCode::S2,
        display_name: "ชั่งเข้า",
    },
    Station {
        code: StationCode::S3,
        display_name: "โหลดสินค้า",
    },
    Station {
        code: StationCode::S4,
        display_name: "ชั่งออก",
    },
];

/// Display name for a known station
pub fn station_name(code: StationCode) -> &'static str {
    STATIONS[code.slot_index()].display_name
}

/// Display name for a raw scanned code, `UNKNOWN_STATION` for anything else
pub fn lookup_station_name(code: &str) -> &'static str {
    StationCode::parse(code)
        .map(station_name)
        .unwrap_or(UNKNOWN_STATION)
}
