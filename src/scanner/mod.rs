//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Sorted, single-threaded directory walking using walkdir
//! - Streaming content hashing with SHA-256 or BLAKE3
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: Streaming file hashing
//!
//! # Example
//!
//! ```no_run
//! use clonex::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

// Re-export main types
pub use hasher::{FileDigest, Fingerprint, HashAlgorithm, Hasher, CHUNK_SIZE};
pub use walker::Walker;

/// A file that was successfully hashed during the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Path as discovered under the scan root
    pub path: PathBuf,
    /// Number of bytes hashed
    pub size: u64,
}

impl FileRecord {
    /// Create a new FileRecord.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Configuration for directory walking.
///
/// The defaults visit every file under the root.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Skip hidden files and directories (names starting with `.`).
    pub skip_hidden: bool,

    /// Glob patterns to ignore (gitignore-style).
    pub ignore_patterns: Vec<String>,
}

impl WalkerConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(skip_hidden: bool, ignore_patterns: Vec<String>) -> Self {
        Self {
            skip_hidden,
            ignore_patterns,
        }
    }
}

/// Category of a file read failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HashFailureKind {
    /// Access-control failure
    PermissionDenied,
    /// Any other I/O failure
    Io,
}

/// Errors that can occur during file hashing.
///
/// Every variant carries the offending path and the underlying cause.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// Permission was denied when opening or reading the file.
    #[error("Permission denied: {}", path.display())]
    PermissionDenied {
        /// Path of the unreadable file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Any other I/O error while reading the file.
    #[error("I/O error for {}: {source}", path.display())]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl HashError {
    /// Classify an I/O error for `path` and log it.
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => {
                log::warn!("Cannot read (permission denied): {}", path.display());
                Self::PermissionDenied {
                    path: path.to_path_buf(),
                    source: error,
                }
            }
            _ => {
                log::warn!("Error reading file: {} - {}", path.display(), error);
                Self::Io {
                    path: path.to_path_buf(),
                    source: error,
                }
            }
        }
    }

    /// Path of the file that failed.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied { path, .. } | Self::Io { path, .. } => path,
        }
    }

    /// Failure category.
    #[must_use]
    pub fn kind(&self) -> HashFailureKind {
        match self {
            Self::PermissionDenied { .. } => HashFailureKind::PermissionDenied,
            Self::Io { .. } => HashFailureKind::Io,
        }
    }
}

/// Non-fatal errors collected while scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// A directory could not be listed.
    #[error("Cannot list {}: {source}", path.display())]
    Walk {
        /// Directory (or entry) that failed
        path: PathBuf,
        /// The underlying walk error
        #[source]
        source: walkdir::Error,
    },

    /// A file could not be hashed.
    #[error(transparent)]
    Hash(#[from] HashError),
}

impl ScanError {
    /// Path associated with the error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Walk { path, .. } => path,
            Self::Hash(e) => e.path(),
        }
    }
}
