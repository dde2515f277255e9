//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Building the fingerprint index of a directory tree
//! - Deriving duplicate groups and their aggregates

pub mod finder;
pub mod groups;
pub mod index;

pub use finder::{
    validate_root, DuplicateFinder, FinderConfig, FinderError, ScanSummary,
    DEFAULT_PROGRESS_INTERVAL,
};
pub use groups::{DuplicateGroup, DuplicateReport, ReportSummary};
pub use index::{FingerprintIndex, IndexEntry};
