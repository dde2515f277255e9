//! Command-line interface definitions for CloneX.
//!
//! This module defines all CLI arguments using the clap derive API, plus
//! the interactive prompt used when no path is given on the command line.
//!
//! # Example
//!
//! ```bash
//! # Scan a directory and print a text report
//! clonex ~/Downloads
//!
//! # No argument: ask for the folder interactively
//! clonex
//!
//! # JSON output for scripting, BLAKE3 fingerprints
//! clonex ~/Downloads --output json --algorithm blake3
//!
//! # Verbose mode for debugging
//! clonex -v ~/Downloads
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::scanner::HashAlgorithm;

/// Find duplicate files by content.
///
/// CloneX fingerprints every file under a folder with a cryptographic hash
/// and lists groups of identical files. Nothing is ever deleted: the first
/// copy found in each group is marked KEEP, the others DUPLICATE.
#[derive(Debug, Parser)]
#[command(name = "clonex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder to scan (asked for interactively when omitted)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress and all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print progress as plain lines, without a spinner
    #[arg(long)]
    pub plain: bool,

    /// Report format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Content hash algorithm
    #[arg(short, long, value_enum)]
    pub algorithm: Option<HashAlgorithm>,

    /// Glob patterns to ignore (can be specified multiple times)
    #[arg(short, long = "ignore", value_name = "PATTERN")]
    pub ignore_patterns: Vec<String>,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Report progress after every N hashed files
    #[arg(long, value_name = "N")]
    pub progress_interval: Option<usize>,

    /// Settings file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Strip surrounding whitespace and quote characters from a typed path.
///
/// Paths pasted from a file manager often arrive wrapped in `"` or `'`.
///
/// # Examples
///
/// ```
/// use clonex::cli::clean_path_input;
/// use std::path::PathBuf;
///
/// assert_eq!(clean_path_input("  \"/tmp/my files\" "), PathBuf::from("/tmp/my files"));
/// assert_eq!(clean_path_input("'downloads'"), PathBuf::from("downloads"));
/// ```
#[must_use]
pub fn clean_path_input(raw: &str) -> PathBuf {
    PathBuf::from(raw.trim().trim_matches('"').trim_matches('\''))
}

/// Apply [`clean_path_input`] to a path given on the command line.
///
/// On Unix, non UTF-8 paths are cleaned byte-wise with the same rules.
/// Elsewhere they are returned unchanged.
#[must_use]
pub fn clean_path_arg(path: PathBuf) -> PathBuf {
    match path.to_str() {
        Some(s) => clean_path_input(s),
        None => clean_raw_path(path),
    }
}

#[cfg(unix)]
fn clean_raw_path(path: PathBuf) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let bytes = path.as_os_str().as_bytes().trim_ascii();
    let bytes = trim_byte(trim_byte(bytes, b'"'), b'\'');
    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn clean_raw_path(path: PathBuf) -> PathBuf {
    path
}

/// Byte counterpart of `str::trim_matches` for a single character.
#[cfg(unix)]
fn trim_byte(mut bytes: &[u8], byte: u8) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if *first != byte {
            break;
        }
        bytes = rest;
    }
    while let [rest @ .., last] = bytes {
        if *last != byte {
            break;
        }
        bytes = rest;
    }
    bytes
}

/// Print the banner and ask for the folder to scan.
///
/// # Errors
///
/// Returns an error if writing the prompt or reading the answer fails, or
/// if input ends before a line is entered.
pub fn prompt_for_path<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<PathBuf> {
    let rule = "=".repeat(60);
    writeln!(output)?;
    writeln!(output, "{rule}")?;
    writeln!(output, "   CloneX")?;
    writeln!(output, "   Find duplicate files to free up space!")?;
    writeln!(output, "{rule}")?;
    writeln!(output)?;
    writeln!(output, "Enter the path to the folder you want to scan.")?;
    writeln!(output, "Examples:")?;
    writeln!(output, "  • Windows: C:\\Users\\YourName\\Downloads")?;
    writeln!(output, "  • Mac/Linux: /home/yourname/Downloads")?;
    writeln!(output, "  • Or just type a folder name like: test_folder")?;
    write!(output, "\nEnter folder path: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no folder path entered",
        ));
    }

    Ok(clean_path_input(&line))
}
