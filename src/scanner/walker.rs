//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and yielding the files that should be hashed. Traversal is
//! depth-first on a single thread, and the entries of every directory are
//! visited in file-name order, so the same tree always yields the same
//! sequence of paths.
//!
//! # Features
//!
//! - Deterministic, sorted depth-first traversal
//! - Symlinks are never descended; only symlinks to regular files are yielded
//! - Special files (FIFOs, sockets, devices) are reported instead of opened
//! - Gitignore-style pattern matching via the `ignore` crate
//! - Optional hidden file filtering
//!
//! # Example
//!
//! ```no_run
//! use clonex::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
//! println!("Found {} files", files.len());
//! ```

use std::io;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use walkdir::{DirEntry, WalkDir};

use super::{HashError, ScanError, WalkerConfig};

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Build a gitignore matcher from the configured patterns.
    fn build_gitignore(&self) -> Option<Gitignore> {
        if self.config.ignore_patterns.is_empty() {
            return None;
        }

        let mut builder = GitignoreBuilder::new(&self.root);
        for pattern in &self.config.ignore_patterns {
            if let Err(e) = builder.add_line(None, pattern) {
                log::warn!("Invalid ignore pattern '{}': {}", pattern, e);
            }
        }

        match builder.build() {
            Ok(gitignore) if gitignore.is_empty() => None,
            Ok(gitignore) => Some(gitignore),
            Err(e) => {
                log::warn!("Failed to build ignore patterns: {}", e);
                None
            }
        }
    }

    /// Check if a path should be ignored based on configured patterns.
    fn should_ignore(&self, path: &Path, is_dir: bool, gitignore: Option<&Gitignore>) -> bool {
        let Some(gi) = gitignore else {
            return false;
        };

        // Match on the path relative to the root, with forward slashes
        let relative_path = path.strip_prefix(&self.root).unwrap_or(path);
        let path_str = relative_path.to_string_lossy();
        let normalized_path = if cfg!(windows) {
            path_str.replace('\\', "/")
        } else {
            path_str.into_owned()
        };

        gi.matched(normalized_path, is_dir).is_ignore()
    }

    /// Whether a non-root entry is kept by the hidden/ignore filters.
    ///
    /// Returning `false` for a directory prunes its whole subtree.
    fn keep_entry(&self, entry: &DirEntry, gitignore: Option<&Gitignore>) -> bool {
        if entry.depth() == 0 {
            return true;
        }

        if self.config.skip_hidden && is_hidden(entry) {
            log::trace!("Skipping hidden entry: {}", entry.path().display());
            return false;
        }

        let is_dir = entry.file_type().is_dir();
        if self.should_ignore(entry.path(), is_dir, gitignore) {
            log::trace!("Ignoring: {}", entry.path().display());
            return false;
        }

        true
    }

    /// Walk the directory tree, yielding the paths of files to hash.
    ///
    /// Directories are never yielded. Errors are yielded as [`ScanError`]
    /// values rather than stopping iteration: an unreadable directory
    /// yields [`ScanError::Walk`] and a special file yields
    /// [`ScanError::Hash`] with [`HashError::Io`].
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
        let gitignore = self.build_gitignore();

        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| self.keep_entry(entry, gitignore.as_ref()))
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => self.classify_entry(entry),
                Err(e) => Some(Err(self.handle_walk_error(e))),
            })
    }

    /// Decide what to do with a single walked entry.
    fn classify_entry(&self, entry: DirEntry) -> Option<Result<PathBuf, ScanError>> {
        let file_type = entry.file_type();

        if file_type.is_dir() {
            return None;
        }

        if file_type.is_file() {
            return Some(Ok(entry.into_path()));
        }

        if file_type.is_symlink() {
            // Only links to regular files reach the hasher. Directory links
            // are neither descended nor hashed.
            return match std::fs::metadata(entry.path()) {
                Ok(target) if target.is_file() => Some(Ok(entry.into_path())),
                Ok(target) if target.is_dir() => {
                    log::debug!("Not following directory symlink: {}", entry.path().display());
                    None
                }
                Ok(_) => Some(Err(not_a_regular_file(entry.path()))),
                Err(e) => Some(Err(ScanError::Hash(HashError::from_io(entry.path(), e)))),
            };
        }

        Some(Err(not_a_regular_file(entry.path())))
    }

    /// Convert a walkdir error to a ScanError.
    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        log::warn!("Cannot list {}: {}", path.display(), error);
        ScanError::Walk {
            path,
            source: error,
        }
    }
}

/// FIFOs, sockets and devices are reported without being opened.
fn not_a_regular_file(path: &Path) -> ScanError {
    ScanError::Hash(HashError::from_io(
        path,
        io::Error::other("not a regular file"),
    ))
}

/// Whether the entry's own name starts with a dot.
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
