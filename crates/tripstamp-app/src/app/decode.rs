//! Station code from a camera frame

use std::path::Path;

use tracing::info;
use tripstamp_infra::decoder::SymbolDecoder;
use tripstamp_types::{Error, Result};

/// Decode a frame into a normalized station code candidate.
///
/// The text is only trimmed and upper-cased; whether it names a real station is
/// decided by the scan itself.
pub fn decode_station_code(decoder: &dyn SymbolDecoder, image: &Path) -> Result<String> {
    let text = decoder
        .decode(image)?
        .ok_or_else(|| Error::Decode(format!("no code found in {}", image.display())))?;
    let code = text.trim().to_uppercase();
    info!(image = %image.display(), code = %code, "decoded station code");
    Ok(code)
}
