//! CloneX - Duplicate File Finder
//!
//! Walks a directory tree, fingerprints every file with a cryptographic
//! hash (SHA-256 by default, BLAKE3 optionally) and reports groups of files
//! with identical content. The report marks the first copy found in each
//! group as the one to keep; nothing is ever deleted.
//!
//! The pipeline is strictly sequential:
//!
//! 1. [`duplicates::DuplicateFinder`] walks and hashes, producing a
//!    [`duplicates::FingerprintIndex`]
//! 2. [`duplicates::DuplicateReport`] derives the duplicate groups
//! 3. [`output`] renders them as text, JSON or CSV
//!
//! # Example
//!
//! ```no_run
//! use clonex::duplicates::FinderConfig;
//! use std::path::Path;
//!
//! let (report, scan) = clonex::find_duplicates(Path::new("."), FinderConfig::default()).unwrap();
//! for group in &report.groups {
//!     println!("keep {}", group.keep().path.display());
//! }
//! println!("{} files scanned", scan.files_scanned);
//! ```

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::duplicates::{
    validate_root, DuplicateFinder, DuplicateReport, FinderConfig, FinderError, ScanSummary,
};
use crate::error::ExitCode;
use crate::output::{CsvOutput, JsonOutput, TextOutput};
use crate::progress::Progress;

/// Scan `root` and derive its duplicate groups.
///
/// # Errors
///
/// Returns `FinderError` if `root` does not exist or is not a directory.
pub fn find_duplicates(
    root: &Path,
    config: FinderConfig,
) -> Result<(DuplicateReport, ScanSummary), FinderError> {
    let (index, summary) = DuplicateFinder::new(config).build_index(root)?;
    Ok((DuplicateReport::from_index(&index), summary))
}

/// Render `report` in the requested format.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_report<W: Write>(
    writer: &mut W,
    format: OutputFormat,
    report: &DuplicateReport,
    scan: &ScanSummary,
    color: bool,
) -> Result<()> {
    match format {
        OutputFormat::Text => TextOutput::new(report, scan)
            .with_color(color)
            .write_to(writer)?,
        OutputFormat::Json => JsonOutput::new(report, scan).write_to(writer, true)?,
        OutputFormat::Csv => CsvOutput::new(report).write_to(&mut *writer)?,
    }
    writer.flush()?;
    Ok(())
}

/// Where the interactive prompt is written for a report format.
///
/// Machine-readable reports own stdout, so the prompt moves to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStream {
    /// Prompt shares stdout with a text report
    Stdout,
    /// Prompt goes to stderr, keeping stdout parseable
    Stderr,
}

impl PromptStream {
    /// Stream to prompt on when the report is rendered as `format`.
    #[must_use]
    pub fn for_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Stdout,
            OutputFormat::Json | OutputFormat::Csv => Self::Stderr,
        }
    }
}

fn read_root_interactively<R: io::BufRead>(
    input: &mut R,
    format: OutputFormat,
) -> Result<std::path::PathBuf> {
    let path = match PromptStream::for_format(format) {
        PromptStream::Stdout => cli::prompt_for_path(input, &mut io::stdout().lock()),
        PromptStream::Stderr => cli::prompt_for_path(input, &mut io::stderr().lock()),
    };
    path.context("Failed to read folder path")
}

/// Run the application for a parsed command line.
///
/// Reads the folder from the command line or, when absent, from an
/// interactive prompt; validates it; scans; and writes the report to
/// stdout.
///
/// # Errors
///
/// Returns a [`FinderError`] (inside `anyhow`) for an invalid folder, and
/// other errors for configuration or output failures. Unreadable files are
/// not errors: they are logged and counted in the report.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let config = Config::from_cli(&cli)?;

    if cli.no_color {
        yansi::disable();
    }

    let root = match cli.path.clone() {
        Some(path) => cli::clean_path_arg(path),
        None => {
            let mut input = io::stdin().lock();
            read_root_interactively(&mut input, config.output)?
        }
    };

    validate_root(&root)?;

    let show_progress = !cli.quiet && config.output == OutputFormat::Text;
    let progress = Arc::new(Progress::with_plain(!show_progress, cli.plain));
    let finder_config = config.finder_config().with_progress_callback(progress);

    let (report, scan) = find_duplicates(&root, finder_config)?;

    let mut stdout = io::stdout().lock();
    let color = !cli.no_color && stdout.is_terminal();
    write_report(&mut stdout, config.output, &report, &scan, color)
        .context("Failed to write report")?;

    Ok(ExitCode::Success)
}
