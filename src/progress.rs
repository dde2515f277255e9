//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`Progress`] struct which implements
//! [`ProgressCallback`] to keep the operator informed while a scan runs:
//! a spinner on stderr with the running file count, and a plain progress
//! line on stdout each time the scanner reports a milestone.
//!
//! # Plain Mode
//!
//! When plain mode is enabled, no spinner is drawn at all. Only the text
//! lines are printed, which suits screen readers and log capture.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress callback for the scanning phase.
///
/// Implement this trait to receive progress updates while the
/// fingerprint index is built.
pub trait ProgressCallback: Send + Sync {
    /// Called once before the first file is hashed.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory being scanned
    fn on_scan_start(&self, root: &Path);

    /// Called after every successfully hashed file.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Size of the file in bytes
    fn on_file_hashed(&self, _bytes: u64) {}

    /// Called when the count of hashed files reaches a multiple of the
    /// configured progress interval.
    ///
    /// # Arguments
    ///
    /// * `scanned` - Files hashed so far
    fn on_progress(&self, scanned: usize);

    /// Called once after the walk finishes.
    ///
    /// # Arguments
    ///
    /// * `scanned` - Files hashed successfully
    /// * `skipped` - Files that could not be read
    fn on_scan_end(&self, scanned: usize, skipped: usize);
}

/// Progress reporter using indicatif.
pub struct Progress {
    spinner: Mutex<Option<ProgressBar>>,
    quiet: bool,
    plain: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, nothing is displayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use clonex::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self::with_plain(quiet, false)
    }

    /// Create a new progress reporter, optionally without a spinner.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, nothing is displayed.
    /// * `plain` - If true, only text lines are printed.
    #[must_use]
    pub fn with_plain(quiet: bool, plain: bool) -> Self {
        Self {
            spinner: Mutex::new(None),
            quiet,
            plain,
        }
    }

    /// Check if plain mode is enabled.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.plain
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} files hashed {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Print a line on stdout without tearing the spinner.
    fn print_line(&self, line: &str) {
        if self.quiet {
            return;
        }

        let emit = || {
            let mut out = io::stdout().lock();
            let _ = writeln!(out, "{line}");
        };

        match self.spinner.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(bar) => bar.suspend(emit),
                None => emit(),
            },
            Err(_) => emit(),
        }
    }
}

impl ProgressCallback for Progress {
    fn on_scan_start(&self, root: &Path) {
        self.print_line(&format!("\nScanning files in {}...\n", root.display()));

        if self.quiet || self.plain {
            return;
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut guard) = self.spinner.lock() {
            *guard = Some(bar);
        }
    }

    fn on_file_hashed(&self, bytes: u64) {
        if let Ok(guard) = self.spinner.lock() {
            if let Some(bar) = guard.as_ref() {
                bar.inc(1);
                bar.set_message(format!("(last: {})", bytesize::ByteSize::b(bytes)));
            }
        }
    }

    fn on_progress(&self, scanned: usize) {
        self.print_line(&format!("  Scanned {} files...", scanned));
    }

    fn on_scan_end(&self, scanned: usize, skipped: usize) {
        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(bar) = guard.take() {
                bar.finish_and_clear();
            }
        }

        if skipped > 0 {
            self.print_line(&format!(
                "\nFinished! Scanned {} files total ({} skipped).\n",
                scanned, skipped
            ));
        } else {
            self.print_line(&format!("\nFinished! Scanned {} files total.\n", scanned));
        }
    }
}
