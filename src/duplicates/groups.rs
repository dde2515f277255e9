//! Duplicate groups derived from a fingerprint index.
//!
//! # Overview
//!
//! Every index entry holding two or more files becomes a
//! [`DuplicateGroup`]. Groups are numbered from 1 in index order, which is
//! the order in which each fingerprint was first discovered. Within a
//! group the first discovered file is the one to keep and every other file
//! is a duplicate.
//!
//! # Example
//!
//! ```
//! use clonex::duplicates::{DuplicateReport, FingerprintIndex};
//! use clonex::scanner::{FileRecord, Fingerprint};
//! use std::path::PathBuf;
//!
//! let mut index = FingerprintIndex::new();
//! let fp = Fingerprint::from_hex("ab12");
//! index.insert(fp.clone(), FileRecord::new(PathBuf::from("/a.txt"), 5));
//! index.insert(fp, FileRecord::new(PathBuf::from("/b.txt"), 5));
//!
//! let report = DuplicateReport::from_index(&index);
//! assert_eq!(report.summary.duplicate_groups, 1);
//! assert_eq!(report.summary.duplicate_files, 1);
//! assert_eq!(report.groups[0].keep().path, PathBuf::from("/a.txt"));
//! ```

use serde::Serialize;

use crate::scanner::{FileRecord, Fingerprint};

use super::FingerprintIndex;

/// Files sharing one fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// 1-based group number
    pub number: usize,
    /// Content fingerprint
    pub fingerprint: Fingerprint,
    /// Files in discovery order; never fewer than two
    pub files: Vec<FileRecord>,
}

impl DuplicateGroup {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Groups are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The first discovered file, to be kept.
    #[must_use]
    pub fn keep(&self) -> &FileRecord {
        &self.files[0]
    }

    /// Every file after the first.
    #[must_use]
    pub fn duplicates(&self) -> &[FileRecord] {
        &self.files[1..]
    }

    /// Number of duplicate copies (total - 1 kept).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Bytes freed by removing every duplicate.
    #[must_use]
    pub fn reclaimable_space(&self) -> u64 {
        self.duplicates().iter().map(|f| f.size).sum()
    }
}

/// Aggregates over all duplicate groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Files marked duplicate across all groups
    pub duplicate_files: usize,
    /// Bytes occupied by the duplicate files
    pub reclaimable_space: u64,
}

/// All duplicate groups found in an index.
#[derive(Debug, Clone, Default)]
pub struct DuplicateReport {
    /// Groups in index order
    pub groups: Vec<DuplicateGroup>,
    /// Aggregate counts
    pub summary: ReportSummary,
}

impl DuplicateReport {
    /// Collect every entry with two or more files.
    #[must_use]
    pub fn from_index(index: &FingerprintIndex) -> Self {
        let groups: Vec<DuplicateGroup> = index
            .iter()
            .filter(|entry| entry.has_duplicates())
            .enumerate()
            .map(|(i, entry)| DuplicateGroup {
                number: i + 1,
                fingerprint: entry.fingerprint.clone(),
                files: entry.files.clone(),
            })
            .collect();

        let summary = ReportSummary {
            duplicate_groups: groups.len(),
            duplicate_files: groups.iter().map(DuplicateGroup::duplicate_count).sum(),
            reclaimable_space: groups.iter().map(DuplicateGroup::reclaimable_space).sum(),
        };

        log::debug!(
            "{} duplicate groups, {} duplicate files",
            summary.duplicate_groups,
            summary.duplicate_files
        );

        Self { groups, summary }
    }

    /// Whether any duplicates were found.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }
}
