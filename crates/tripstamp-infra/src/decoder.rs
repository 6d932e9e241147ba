//! Station code decoding from camera frames
//!
//! Symbol recognition itself is delegated to an external program (zbarimg by
//! default); this module only validates the frame, runs the command once and
//! picks the decoded text out of its output.

use std::path::Path;
use std::process::Command;

use tracing::debug;
use tripstamp_types::{Error, Result};

/// Frame formats the decoder is handed
const FRAME_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];

/// Decodes one symbol from an image, best effort, no retry
pub trait SymbolDecoder {
    /// `Ok(None)` when no symbol could be read
    fn decode(&self, image: &Path) -> Result<Option<String>>;
}

/// Runs a configured command line with the image path appended
#[derive(Debug, Clone)]
pub struct CommandDecoder {
    program: String,
    args: Vec<String>,
}

impl CommandDecoder {
    /// Parse a shell-style command line such as `zbarimg --raw --quiet`
    pub fn from_command_line(command: &str) -> Result<Self> {
        let mut parts = shell_words::split(command)
            .map_err(|e| Error::Decode(format!("invalid decoder command '{}': {}", command, e)))?;
        if parts.is_empty() {
            return Err(Error::Decode("decoder command is empty".to_string()));
        }
        let program = parts.remove(0);
        Ok(Self {
            program,
            args: parts,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl SymbolDecoder for CommandDecoder {
    fn decode(&self, image: &Path) -> Result<Option<String>> {
        check_frame(image)?;

        debug!(program = %self.program, args = ?self.args, image = %image.display(), "running decoder");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(image)
            .output()
            .map_err(|e| Error::Decode(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(status = ?output.status.code(), stderr = %stderr.trim(), "decoder found no symbol");
            return Ok(None);
        }

        Ok(first_symbol(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Refuse a frame the decoder could not read: missing, not a file, an
/// unexpected extension, or a header the `image` crate cannot make sense of
fn check_frame(frame: &Path) -> Result<()> {
    if !frame.is_file() {
        return Err(Error::FileNotFound(format!(
            "camera frame {} does not exist or is not a file",
            frame.display()
        )));
    }

    let extension = frame
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !FRAME_EXTENSIONS.contains(&extension.as_str()) {
        return Err(Error::InvalidImageFormat(format!(
            "cannot decode {}: frame must be one of {}",
            frame.display(),
            FRAME_EXTENSIONS.join(", ")
        )));
    }

    image::ImageReader::open(frame)?
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(())
}

/// First non-empty output line, without a `TYPE:` prefix such as `QR-Code:`
fn first_symbol(stdout: &str) -> Option<String> {
    let line = stdout.lines().map(str::trim).find(|l| !l.is_empty())?;
    let text = match line.split_once(':') {
        Some((kind, rest)) if kind.contains("Code") || kind.starts_with("EAN") => rest.trim(),
        _ => line,
    };
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
