//! Streaming content hasher.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing a content
//! [`Fingerprint`] of a single file. Files are read in fixed
//! [`CHUNK_SIZE`] chunks and fed into an incremental digest, so memory use
//! stays bounded regardless of file size.
//!
//! SHA-256 is the default digest; BLAKE3 can be selected with
//! [`HashAlgorithm::Blake3`].
//!
//! # Example
//!
//! ```no_run
//! use clonex::scanner::{HashAlgorithm, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new(HashAlgorithm::Sha256);
//! match hasher.hash_file(Path::new("Cargo.toml")) {
//!     Ok(digest) => println!("{} ({} bytes)", digest.fingerprint, digest.bytes),
//!     Err(e) => eprintln!("skipped: {}", e),
//! }
//! ```

use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::HashError;

/// Size of each read from disk (64 KiB).
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Digest used to fingerprint file content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256 (FIPS 180-4)
    #[default]
    Sha256,
    /// BLAKE3
    Blake3,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Sha256 => write!(f, "sha256"),
            HashAlgorithm::Blake3 => write!(f, "blake3"),
        }
    }
}

/// Hex-encoded digest identifying file content.
///
/// Two files with equal fingerprints are treated as identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wrap an already hex-encoded digest.
    #[must_use]
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into().to_ascii_lowercase())
    }

    /// The hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `len` characters, for compact display.
    #[must_use]
    pub fn short(&self, len: usize) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(len)
            .map_or(self.0.len(), |(i, _)| i);
        &self.0[..end]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of hashing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    /// Content fingerprint
    pub fingerprint: Fingerprint,
    /// Number of bytes read
    pub bytes: u64,
}

/// Incremental digest state for the selected algorithm.
enum Digester {
    Sha256(Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl Digester {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
            HashAlgorithm::Blake3 => Self::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, chunk: &[u8]) {
        match self {
            Self::Sha256(h) => h.update(chunk),
            Self::Blake3(h) => {
                h.update(chunk);
            }
        }
    }

    fn finalize(self) -> Fingerprint {
        match self {
            Self::Sha256(h) => Fingerprint(format!("{:x}", h.finalize())),
            Self::Blake3(h) => Fingerprint(h.finalize().to_hex().to_string()),
        }
    }
}

/// Content hasher for individual files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hasher {
    algorithm: HashAlgorithm,
}

impl Hasher {
    /// Create a hasher using the given digest.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// The digest this hasher uses.
    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Hash the full content of the file at `path`.
    ///
    /// The file is opened, drained in [`CHUNK_SIZE`] reads and closed before
    /// returning, on success and on every error path.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::PermissionDenied`] when the file cannot be opened
    /// or read for access-control reasons, and [`HashError::Io`] for any other
    /// I/O failure. Both are logged at warn level with the path.
    pub fn hash_file(&self, path: &Path) -> Result<FileDigest, HashError> {
        let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        self.hash_reader(&mut file)
            .map_err(|e| HashError::from_io(path, e))
    }

    /// Hash everything readable from `reader`.
    ///
    /// # Errors
    ///
    /// Propagates the first read error other than `Interrupted`.
    pub fn hash_reader<R: Read>(&self, reader: &mut R) -> std::io::Result<FileDigest> {
        let mut digester = Digester::new(self.algorithm);
        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut bytes = 0u64;

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            digester.update(&buffer[..n]);
            bytes += n as u64;
        }

        Ok(FileDigest {
            fingerprint: digester.finalize(),
            bytes,
        })
    }

    /// Hash an in-memory byte slice.
    #[must_use]
    pub fn hash_bytes(&self, data: &[u8]) -> Fingerprint {
        let mut digester = Digester::new(self.algorithm);
        digester.update(data);
        digester.finalize()
    }
}
