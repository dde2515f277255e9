//! Output formatters for duplicate scan results.
//!
//! This module provides different output formats for scan results:
//! - Text for people reading a terminal
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! # Example
//!
//! ```no_run
//! use clonex::duplicates::{DuplicateFinder, DuplicateReport};
//! use clonex::output::json::JsonOutput;
//! use std::path::Path;
//!
//! let (index, summary) = DuplicateFinder::with_defaults()
//!     .build_index(Path::new("."))
//!     .unwrap();
//! let report = DuplicateReport::from_index(&index);
//!
//! let output = JsonOutput::new(&report, &summary);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod csv;
pub mod json;
pub mod text;

// Re-export main types
pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::text::TextOutput;
