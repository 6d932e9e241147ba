//! Header-checked CSV table shared by the trip and billing sheets

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tempfile::NamedTempFile;
use tracing::debug;
use tripstamp_types::{Error, Result};

pub(crate) struct Sheet {
    path: PathBuf,
    headers: &'static [&'static str],
}

impl Sheet {
    /// Open the sheet at `path`, writing the header row if the file is new
    pub(crate) fn open(path: PathBuf, headers: &'static [&'static str]) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| unavailable(&path, e))?;
            }
        }

        let sheet = Self { path, headers };
        let is_new = fs::metadata(&sheet.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);
        if is_new {
            let mut writer = csv::Writer::from_path(&sheet.path).map_err(|e| unavailable(&sheet.path, e))?;
            writer
                .write_record(sheet.headers)
                .map_err(|e| unavailable(&sheet.path, e))?;
            writer.flush().map_err(|e| unavailable(&sheet.path, e))?;
            debug!(path = %sheet.path.display(), "created sheet");
        }
        Ok(sheet)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// All data rows in sheet order
    pub(crate) fn read_records(&self) -> Result<Vec<StringRecord>> {
        let file = File::open(&self.path).map_err(|e| unavailable(&self.path, e))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| unavailable(&self.path, e))?
            .clone();
        self.validate_headers(&headers)?;

        let mut records = Vec::new();
        for result in reader.records() {
            records.push(result.map_err(|e| unavailable(&self.path, e))?);
        }
        debug!(path = %self.path.display(), rows = records.len(), "read sheet");
        Ok(records)
    }

    pub(crate) fn append_record(&self, fields: &[String]) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| unavailable(&self.path, e))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record(fields)
            .map_err(|e| unavailable(&self.path, e))?;
        writer.flush().map_err(|e| unavailable(&self.path, e))?;
        Ok(())
    }

    /// Rewrite the sheet with the data row at `position` replaced.
    ///
    /// The new content goes to a uniquely named file next to the sheet, which
    /// is then renamed over it; a failed write leaves the old sheet intact and
    /// concurrent writers never share a temporary file.
    pub(crate) fn replace_record(&self, position: usize, fields: &[String]) -> Result<()> {
        let mut records = self.read_records()?;
        let len = records.len();
        let target = records
            .get_mut(position)
            .ok_or(Error::PositionOutOfRange { position, len })?;
        *target = StringRecord::from(fields.to_vec());

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| unavailable(dir, e))?;
        {
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(tmp.as_file_mut());
            writer
                .write_record(self.headers)
                .map_err(|e| unavailable(&self.path, e))?;
            for record in &records {
                writer
                    .write_record(record)
                    .map_err(|e| unavailable(&self.path, e))?;
            }
            writer.flush().map_err(|e| unavailable(&self.path, e))?;
        }
        tmp.persist(&self.path)
            .map_err(|e| unavailable(&self.path, e.error))?;
        debug!(path = %self.path.display(), position, "rewrote sheet");
        Ok(())
    }

    fn validate_headers(&self, headers: &StringRecord) -> Result<()> {
        let actual: Vec<&str> = headers.iter().map(str::trim).collect();
        if actual != self.headers {
            return Err(Error::MalformedRow {
                row: 1,
                message: format!(
                    "unexpected header in {}: expected [{}], found [{}]",
                    self.path.display(),
                    self.headers.join(", "),
                    actual.join(", ")
                ),
            });
        }
        Ok(())
    }
}

/// Sheet row number for a 0-based data position (header is row 1)
pub(crate) fn sheet_row(position: usize) -> usize {
    position + 2
}

pub(crate) fn unavailable(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::StoreUnavailable(format!("{}: {}", path.display(), err))
}
