//! CSV dataset writer.
//!
//! Append-only: a header row fixed at open time, followed by one row per
//! accepted document in processing order. Reopening an existing dataset
//! appends rows without duplicating the header; a non-empty file whose
//! first line is not the expected header is rejected.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{ExtractorError, Result};
use crate::extractor::Record;

/// Handle for one output dataset, owned for the duration of a run.
///
/// The underlying writer flushes on drop, so rows written before a fatal
/// error still reach the file. Call [`DatasetWriter::finish`] to flush
/// explicitly and surface IO errors.
pub struct DatasetWriter {
    writer: csv::Writer<File>,
}

impl DatasetWriter {
    /// Open a dataset for appending, writing the header if the file is new
    /// or empty.
    ///
    /// # Arguments
    /// * `path` - Output CSV path
    ///
    /// # Returns
    /// * `Err(ExtractorError::HeaderMismatch)` if the file already has
    ///   content that does not start with the expected header
    pub fn open(path: &Path) -> Result<Self> {
        let needs_header = match std::fs::metadata(path) {
            Ok(meta) if meta.len() > 0 => {
                verify_header(path)?;
                false
            }
            _ => true,
        };

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record(Record::COLUMNS)?;
        }

        Ok(Self { writer })
    }

    /// Append one record as a row in fixed column order.
    pub fn append(&mut self, record: &Record) -> Result<()> {
        self.writer.serialize(record)?;
        Ok(())
    }

    /// Flush the dataset and release the handle.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Check that an existing file starts with the expected header row.
fn verify_header(path: &Path) -> Result<()> {
    let expected = Record::COLUMNS.join(",");

    let mut first_line = String::new();
    BufReader::new(File::open(path)?).read_line(&mut first_line)?;
    let found = first_line.trim_end_matches(['\r', '\n']);

    if found == expected {
        Ok(())
    } else {
        Err(ExtractorError::HeaderMismatch {
            path: path.display().to_string(),
            expected,
            found: found.to_string(),
        })
    }
}
