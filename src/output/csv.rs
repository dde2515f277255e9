//! CSV output formatter for duplicate scan results.
//!
//! One row is generated for each file in each duplicate group.
//!
//! # Columns
//!
//! - `group_id`: 1-based group number
//! - `hash`: content fingerprint (hexadecimal)
//! - `role`: `keep` or `duplicate`
//! - `path`: file path as discovered
//! - `size`: file size in bytes

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::duplicates::DuplicateReport;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Column names, in row order.
const HEADER: [&str; 5] = ["group_id", "hash", "role", "path", "size"];

/// Whether a row is the kept copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Role {
    Keep,
    Duplicate,
}

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    group_id: usize,
    hash: &'a str,
    role: Role,
    path: String,
    size: u64,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    report: &'a DuplicateReport,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(report: &'a DuplicateReport) -> Self {
        Self { report }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        // Header is written up front so a report without groups is still
        // a valid CSV document
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(HEADER)?;

        for group in &self.report.groups {
            for (i, file) in group.files.iter().enumerate() {
                let row = CsvRow {
                    group_id: group.number,
                    hash: group.fingerprint.as_str(),
                    role: if i == 0 { Role::Keep } else { Role::Duplicate },
                    path: file.path.to_string_lossy().into_owned(),
                    size: file.size,
                };
                csv_writer.serialize(row)?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_csv_string(&self) -> Result<String, CsvOutputError> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
