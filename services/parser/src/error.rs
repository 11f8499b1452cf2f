//! Error types for timetable ingestion

use thiserror::Error;

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Message shown when a file parsed fine but held no usable entries
pub const EMPTY_RESULT_MESSAGE: &str =
    "Could not parse any valid timetable entries from the file.";

/// Errors surfaced to whoever drives an upload
#[derive(Error, Debug)]
pub enum IngestError {
    /// The file could not be read or decoded. The message is fixed and
    /// user-facing; the underlying cause is logged where it happens.
    #[error("{message}")]
    Read { message: &'static str },

    /// The file was readable but no entry survived cleaning
    #[error("{}", EMPTY_RESULT_MESSAGE)]
    EmptyResult,

    /// Export requested on an empty timetable
    #[error("No data to download.")]
    NothingToExport,

    /// Writing the export file failed
    #[error("Export failed: {0}")]
    Export(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IngestError {
    pub(crate) fn read(message: &'static str) -> Self {
        IngestError::Read { message }
    }

    /// True for errors that mean "try another file"
    pub fn is_upload_failure(&self) -> bool {
        matches!(self, IngestError::Read { .. } | IngestError::EmptyResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_displays_fixed_message() {
        let err = IngestError::read("Failed to read CSV.");
        assert_eq!(err.to_string(), "Failed to read CSV.");
        assert!(err.is_upload_failure());
    }

    #[test]
    fn test_empty_result_message() {
        assert_eq!(IngestError::EmptyResult.to_string(), EMPTY_RESULT_MESSAGE);
        assert!(!IngestError::NothingToExport.is_upload_failure());
    }
}
