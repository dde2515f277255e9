//! Fingerprint index built during a scan.
//!
//! The index maps each [`Fingerprint`] to the files that produced it, in
//! discovery order. Fingerprints themselves are kept in the order they were
//! first seen, so iterating the index is deterministic for a deterministic
//! walk.

use std::collections::HashMap;

use crate::scanner::{FileRecord, Fingerprint};

/// One fingerprint and every file that hashed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Content fingerprint shared by all files
    pub fingerprint: Fingerprint,
    /// Files in discovery order
    pub files: Vec<FileRecord>,
}

impl IndexEntry {
    /// Whether this entry holds two or more files.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.files.len() > 1
    }
}

/// Insertion-ordered mapping from fingerprint to files.
#[derive(Debug, Clone, Default)]
pub struct FingerprintIndex {
    slots: HashMap<Fingerprint, usize>,
    entries: Vec<IndexEntry>,
}

impl FingerprintIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` to the entry for `fingerprint`, creating it if absent.
    pub fn insert(&mut self, fingerprint: Fingerprint, record: FileRecord) {
        if let Some(&slot) = self.slots.get(&fingerprint) {
            self.entries[slot].files.push(record);
            return;
        }

        self.slots.insert(fingerprint.clone(), self.entries.len());
        self.entries.push(IndexEntry {
            fingerprint,
            files: vec![record],
        });
    }

    /// Files recorded for `fingerprint`.
    #[must_use]
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&[FileRecord]> {
        self.slots
            .get(fingerprint)
            .map(|&slot| self.entries[slot].files.as_slice())
    }

    /// Number of distinct fingerprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no file has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of files across all entries.
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.entries.iter().map(|e| e.files.len()).sum()
    }

    /// Entries in order of first insertion.
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a FingerprintIndex {
    type Item = &'a IndexEntry;
    type IntoIter = std::slice::Iter<'a, IndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
