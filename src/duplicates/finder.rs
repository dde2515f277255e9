//! Duplicate finder: builds the fingerprint index for a directory tree.
//!
//! # Overview
//!
//! [`DuplicateFinder`] validates the scan root, walks it with
//! [`Walker`], hashes every discovered file with [`Hasher`] and records
//! each success in a [`FingerprintIndex`]. The whole run is a single
//! sequential pass; the index is built locally and returned by value.
//!
//! Files that cannot be read are logged, counted and collected in
//! [`ScanSummary::errors`]; they never abort the scan. Only an invalid
//! root is fatal.
//!
//! # Example
//!
//! ```no_run
//! use clonex::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default());
//! let (index, summary) = finder.build_index(Path::new(".")).unwrap();
//!
//! println!("{} files, {} distinct contents", summary.files_scanned, index.len());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::progress::ProgressCallback;
use crate::scanner::{
    FileRecord, HashAlgorithm, HashFailureKind, Hasher, ScanError, Walker, WalkerConfig,
};

use super::FingerprintIndex;

/// Default number of hashed files between progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Digest used for fingerprints
    pub algorithm: HashAlgorithm,
    /// Walker configuration (filters)
    pub walker_config: WalkerConfig,
    /// Hashed files between progress reports (at least 1)
    pub progress_interval: usize,
    /// Optional progress callback
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("algorithm", &self.algorithm)
            .field("walker_config", &self.walker_config)
            .field("progress_interval", &self.progress_interval)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            walker_config: WalkerConfig::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the digest.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the progress interval. Zero is treated as one.
    #[must_use]
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Summary statistics from building the index.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Files hashed successfully
    pub files_scanned: usize,
    /// Files that could not be read
    pub files_skipped: usize,
    /// Bytes hashed across all scanned files
    pub bytes_scanned: u64,
    /// Digest used
    pub algorithm: HashAlgorithm,
    /// Wall time of the scan
    pub scan_duration: Duration,
    /// Non-fatal errors in the order they occurred
    pub errors: Vec<ScanError>,
}

impl ScanSummary {
    /// Number of skipped files that failed with a permission error.
    #[must_use]
    pub fn permission_denied_count(&self) -> usize {
        self.errors
            .iter()
            .filter(|e| {
                matches!(e, ScanError::Hash(h) if h.kind() == HashFailureKind::PermissionDenied)
            })
            .count()
    }

    /// Whether anything was skipped or could not be listed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided path does not exist.
    #[error("The folder '{}' does not exist!", .0.display())]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("'{}' is a file, not a folder!", .0.display())]
    NotADirectory(PathBuf),
}

impl FinderError {
    /// Follow-up hint for the operator.
    #[must_use]
    pub fn hint(&self) -> &'static str {
        match self {
            Self::PathNotFound(_) => "Please check the path and try again.",
            Self::NotADirectory(_) => "Please enter a folder path.",
        }
    }
}

/// Check that `path` exists and is a directory.
///
/// # Errors
///
/// Returns [`FinderError::PathNotFound`] or [`FinderError::NotADirectory`].
pub fn validate_root(path: &Path) -> Result<(), FinderError> {
    if !path.exists() {
        return Err(FinderError::PathNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(FinderError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Builds a [`FingerprintIndex`] for a directory tree.
#[derive(Debug)]
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let hasher = Hasher::new(config.algorithm);
        Self { config, hasher }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Walk `root` and fingerprint every file under it.
    ///
    /// # Returns
    ///
    /// A tuple of:
    /// - `FingerprintIndex` - every readable file, grouped by content
    /// - `ScanSummary` - counts, timing and the non-fatal errors
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if the path does not exist or is not a
    /// directory. Nothing is scanned in that case.
    pub fn build_index(
        &self,
        root: &Path,
    ) -> Result<(FingerprintIndex, ScanSummary), FinderError> {
        validate_root(root)?;

        let start_time = Instant::now();
        let mut index = FingerprintIndex::new();
        let mut summary = ScanSummary {
            algorithm: self.config.algorithm,
            ..ScanSummary::default()
        };

        log::info!(
            "Starting {} scan of {}",
            self.config.algorithm,
            root.display()
        );

        let callback = self.config.progress_callback.as_deref();
        if let Some(cb) = callback {
            cb.on_scan_start(root);
        }

        let walker = Walker::new(root, self.config.walker_config.clone());
        let interval = self.config.progress_interval.max(1);

        for result in walker.walk() {
            let path = match result {
                Ok(path) => path,
                Err(e) => {
                    if matches!(e, ScanError::Hash(_)) {
                        summary.files_skipped += 1;
                    }
                    summary.errors.push(e);
                    continue;
                }
            };

            let digest = match self.hasher.hash_file(&path) {
                Ok(digest) => digest,
                Err(e) => {
                    summary.files_skipped += 1;
                    summary.errors.push(ScanError::Hash(e));
                    continue;
                }
            };

            log::trace!("{} {}", digest.fingerprint.short(16), path.display());
            summary.files_scanned += 1;
            summary.bytes_scanned += digest.bytes;
            index.insert(digest.fingerprint, FileRecord::new(path, digest.bytes));

            if let Some(cb) = callback {
                cb.on_file_hashed(digest.bytes);
                if summary.files_scanned % interval == 0 {
                    cb.on_progress(summary.files_scanned);
                }
            }
        }

        summary.scan_duration = start_time.elapsed();

        if let Some(cb) = callback {
            cb.on_scan_end(summary.files_scanned, summary.files_skipped);
        }

        log::info!(
            "Scanned {} files ({} skipped, {} distinct contents) in {:?}",
            summary.files_scanned,
            summary.files_skipped,
            index.len(),
            summary.scan_duration
        );

        Ok((index, summary))
    }
}
