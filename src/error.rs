//! Exit codes.

use crate::duplicates::FinderError;

/// Exit codes for the CloneX application.
///
/// - 0: Success (report printed, with or without duplicates)
/// - 1: General error (unexpected failure)
/// - 2: Invalid path (missing, or not a directory)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: the scan completed and the report was written.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Invalid path: the scan root does not exist or is a file.
    InvalidPath = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "CX000",
            Self::GeneralError => "CX001",
            Self::InvalidPath => "CX002",
        }
    }

    /// Pick the exit code for an error returned by [`crate::run_app`].
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err.downcast_ref::<FinderError>().is_some() {
            Self::InvalidPath
        } else {
            Self::GeneralError
        }
    }
}
