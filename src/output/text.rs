//! Human-readable text report.
//!
//! Renders each duplicate group with its kept file and its duplicates,
//! followed by a summary. When no group exists a single "no duplicates"
//! message is written instead of an empty listing.
//!
//! # Example
//!
//! ```no_run
//! use clonex::duplicates::{DuplicateFinder, DuplicateReport};
//! use clonex::output::TextOutput;
//! use std::path::Path;
//!
//! let (index, summary) = DuplicateFinder::with_defaults()
//!     .build_index(Path::new("."))
//!     .unwrap();
//! let report = DuplicateReport::from_index(&index);
//!
//! TextOutput::new(&report, &summary)
//!     .write_to(&mut std::io::stdout())
//!     .unwrap();
//! ```

use std::io::{self, Write};

use bytesize::ByteSize;
use yansi::{Paint, Style};

use crate::duplicates::{DuplicateGroup, DuplicateReport, ScanSummary};
use crate::scanner::{HashError, ScanError};

const RULE_WIDTH: usize = 60;
const GROUP_RULE_WIDTH: usize = 50;

/// Text formatter for a duplicate report.
pub struct TextOutput<'a> {
    report: &'a DuplicateReport,
    scan: &'a ScanSummary,
    color: bool,
}

impl<'a> TextOutput<'a> {
    /// Create a new formatter. Color is off until enabled.
    #[must_use]
    pub fn new(report: &'a DuplicateReport, scan: &'a ScanSummary) -> Self {
        Self {
            report,
            scan,
            color: false,
        }
    }

    /// Enable or disable ANSI colors.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.paint(style).to_string()
        } else {
            text.to_string()
        }
    }

    /// Write the report to `writer`.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(writer, "{rule}")?;
        writeln!(
            writer,
            "{}",
            self.paint("DUPLICATE FILES:", Style::new().bold())
        )?;
        writeln!(writer, "{rule}")?;

        for group in &self.report.groups {
            self.write_group(writer, group)?;
        }

        writeln!(writer)?;
        writeln!(writer, "{rule}")?;
        if self.report.has_duplicates() {
            self.write_summary(writer)?;
        } else {
            writeln!(
                writer,
                "{}",
                self.paint(
                    "Great news! No duplicate files were found.",
                    Style::new().green()
                )
            )?;
            self.write_skipped(writer)?;
        }
        writeln!(writer, "{rule}")?;

        Ok(())
    }

    fn write_group<W: Write>(&self, writer: &mut W, group: &DuplicateGroup) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(
            writer,
            "{}",
            self.paint(
                &format!("Duplicate Group #{}:", group.number),
                Style::new().red().bold()
            )
        )?;
        writeln!(
            writer,
            "   (These {} files are identical copies, {} {})",
            group.len(),
            self.scan.algorithm,
            group.fingerprint.short(16)
        )?;
        writeln!(writer, "{}", "-".repeat(GROUP_RULE_WIDTH))?;

        writeln!(
            writer,
            "   {} {}",
            self.paint("KEEP:", Style::new().green().bold()),
            group.keep().path.display()
        )?;
        for file in group.duplicates() {
            writeln!(
                writer,
                "   {} {}",
                self.paint("DUPLICATE:", Style::new().red()),
                file.path.display()
            )?;
        }

        Ok(())
    }

    fn write_summary<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let summary = &self.report.summary;

        writeln!(writer, "{}", self.paint("SUMMARY:", Style::new().bold()))?;
        writeln!(
            writer,
            "   • Found {} group(s) of duplicates",
            summary.duplicate_groups
        )?;
        writeln!(
            writer,
            "   • {} file(s) can be safely deleted",
            summary.duplicate_files
        )?;
        writeln!(
            writer,
            "   • {} can be reclaimed",
            ByteSize::b(summary.reclaimable_space)
        )?;
        self.write_skipped(writer)?;
        writeln!(writer)?;
        writeln!(
            writer,
            "TIP: You can delete the files marked DUPLICATE to free up space!"
        )?;

        Ok(())
    }

    /// Count of unreadable files, then one line per recorded failure.
    fn write_skipped<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if self.scan.files_skipped > 0 {
            writeln!(
                writer,
                "   • {} file(s) could not be read and were skipped",
                self.scan.files_skipped
            )?;
        }
        for error in &self.scan.errors {
            writeln!(
                writer,
                "     {} {} ({})",
                self.paint("SKIPPED:", Style::new().yellow()),
                error.path().display(),
                failure_reason(error)
            )?;
        }
        Ok(())
    }
}

fn failure_reason(error: &ScanError) -> String {
    match error {
        ScanError::Walk { source, .. } => match source.io_error() {
            Some(e) => format!("cannot list folder: {e}"),
            None => format!("cannot list folder: {source}"),
        },
        ScanError::Hash(HashError::PermissionDenied { .. }) => "permission denied".to_string(),
        ScanError::Hash(HashError::Io { source, .. }) => source.to_string(),
    }
}
