//! JSON output formatter for duplicate scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "group": 1,
//!       "hash": "2cf24dba...",
//!       "size": 5,
//!       "keep": "/path/to/a.txt",
//!       "duplicates": ["/path/to/b.txt"]
//!     }
//!   ],
//!   "summary": {
//!     "algorithm": "sha256",
//!     "files_scanned": 3,
//!     "files_skipped": 0,
//!     "bytes_scanned": 15,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 1,
//!     "reclaimable_space": 5,
//!     "scan_duration_ms": 3
//!   },
//!   "skipped": []
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, DuplicateReport, ScanSummary};
use crate::scanner::{HashAlgorithm, ScanError};

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// 1-based group number
    pub group: usize,
    /// Content fingerprint (hex)
    pub hash: String,
    /// Size of each file in bytes
    pub size: u64,
    /// File to keep
    pub keep: String,
    /// Files that duplicate `keep`
    pub duplicates: Vec<String>,
}

impl JsonDuplicateGroup {
    /// Create a JSON duplicate group from a DuplicateGroup.
    #[must_use]
    pub fn from_duplicate_group(group: &DuplicateGroup) -> Self {
        Self {
            group: group.number,
            hash: group.fingerprint.to_string(),
            size: group.keep().size,
            keep: group.keep().path.to_string_lossy().into_owned(),
            duplicates: group
                .duplicates()
                .iter()
                .map(|f| f.path.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Digest used
    pub algorithm: HashAlgorithm,
    /// Files hashed successfully
    pub files_scanned: usize,
    /// Files that could not be read
    pub files_skipped: usize,
    /// Bytes hashed
    pub bytes_scanned: u64,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Files marked duplicate
    pub duplicate_files: usize,
    /// Bytes occupied by duplicate files
    pub reclaimable_space: u64,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
}

/// A path that was skipped, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSkipped {
    /// Offending path
    pub path: String,
    /// Error message
    pub error: String,
}

impl JsonSkipped {
    fn from_scan_error(error: &ScanError) -> Self {
        Self {
            path: error.path().to_string_lossy().into_owned(),
            error: error.to_string(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// List of duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Scan summary statistics
    pub summary: JsonSummary,
    /// Paths that could not be read or listed
    pub skipped: Vec<JsonSkipped>,
}

impl JsonOutput {
    /// Create a new JSON output from a report and its scan summary.
    #[must_use]
    pub fn new(report: &DuplicateReport, scan: &ScanSummary) -> Self {
        Self {
            duplicates: report
                .groups
                .iter()
                .map(JsonDuplicateGroup::from_duplicate_group)
                .collect(),
            summary: JsonSummary {
                algorithm: scan.algorithm,
                files_scanned: scan.files_scanned,
                files_skipped: scan.files_skipped,
                bytes_scanned: scan.bytes_scanned,
                duplicate_groups: report.summary.duplicate_groups,
                duplicate_files: report.summary.duplicate_files,
                reclaimable_space: report.summary.reclaimable_space,
                scan_duration_ms: scan.scan_duration.as_millis() as u64,
            },
            skipped: scan.errors.iter().map(JsonSkipped::from_scan_error).collect(),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
