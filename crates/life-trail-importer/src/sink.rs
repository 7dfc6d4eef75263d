//! CSV output sink
//!
//! The output file accumulates rows across batch runs: it is created on first
//! use with a single header line, and subsequent opens append data rows only.

use std::fs::{self, OpenOptions};
use std::path::Path;

use life_trail_lib::TrailRow;

use crate::error::Result;

const HEADER: [&str; 5] = ["timestamp", "latitude", "longitude", "altitude", "speed"];

pub struct CsvSink {
    writer: csv::Writer<fs::File>,
}

impl CsvSink {
    /// Open the sink, creating the file (and parent directories) as needed.
    ///
    /// The header is written only when the file did not previously exist.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let existed = path.exists();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if !existed {
            writer.write_record(HEADER)?;
        }

        Ok(Self { writer })
    }

    /// Append converted rows in order
    pub fn append_rows(&mut self, rows: &[TrailRow]) -> Result<()> {
        for row in rows {
            self.writer.serialize(row)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
