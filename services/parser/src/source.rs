//! Input files: format detection and async reads
//!
//! The format is decided by file name only: `.csv` (any case) is CSV,
//! everything else goes to the workbook reader.

use std::path::Path;

use crate::csv_ingest::parse_csv;
use crate::entry::ScheduleEntry;
use crate::error::{IngestError, Result};
use crate::sheet_ingest::{SheetIngester, WORKBOOK_READ_ERROR};

/// Fixed message for a CSV file that cannot be read
pub const CSV_READ_ERROR: &str = "Failed to read CSV.";

/// Input format of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Csv,
    Workbook,
}

impl SourceKind {
    /// Detect the format from a file name
    pub fn from_name(name: &str) -> Self {
        if name.to_lowercase().ends_with(".csv") {
            SourceKind::Csv
        } else {
            SourceKind::Workbook
        }
    }

    /// User-facing message when reading this kind of file fails
    pub fn read_error_message(self) -> &'static str {
        match self {
            SourceKind::Csv => CSV_READ_ERROR,
            SourceKind::Workbook => WORKBOOK_READ_ERROR,
        }
    }
}

/// Decode CSV bytes as UTF-8, replacing invalid sequences and dropping a BOM
pub fn decode_text(bytes: &[u8]) -> String {
    let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if had_errors {
        tracing::warn!("CSV contains invalid UTF-8; replaced bad sequences");
    }
    text.into_owned()
}

/// Read a whole file. The only await point of an upload.
pub async fn read_file(path: &Path, kind: SourceKind) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|e| {
        tracing::warn!("Reading {} failed: {}", path.display(), e);
        IngestError::read(kind.read_error_message())
    })
}

/// Turn already-read bytes into raw entries
pub fn ingest_bytes(kind: SourceKind, bytes: &[u8], sheets: &SheetIngester) -> Result<Vec<ScheduleEntry>> {
    match kind {
        SourceKind::Csv => Ok(parse_csv(&decode_text(bytes))),
        SourceKind::Workbook => sheets.parse_workbook(bytes),
    }
}
