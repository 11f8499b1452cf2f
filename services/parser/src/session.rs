//! Upload session
//!
//! Owns the timetable for the lifetime of the process. Every upload runs
//! read -> ingest -> clean -> merge/replace; any failure leaves the current
//! timetable exactly as it was.

use std::path::Path;

use serde::Serialize;

use crate::clean::clean_entries;
use crate::entry::ScheduleEntry;
use crate::error::{IngestError, Result};
use crate::export;
use crate::sheet_ingest::SheetIngester;
use crate::source::{ingest_bytes, read_file, SourceKind};
use crate::store::{Timetable, UploadMode};
use crate::summary::Summary;
use crate::view::{query_view, Filter};

/// Outcome of one successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReport {
    pub file: String,
    pub mode: UploadMode,
    /// Entries produced by the ingester
    pub parsed: usize,
    /// Entries left after cleaning
    pub kept: usize,
    pub before: usize,
    pub after: usize,
}

#[derive(Default)]
pub struct Session {
    timetable: Timetable,
    sheets: SheetIngester,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session using a custom workbook ingester (layout, section grammar)
    pub fn with_ingester(sheets: SheetIngester) -> Self {
        Self {
            timetable: Timetable::new(),
            sheets,
        }
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// Read a file from disk and apply it
    pub async fn upload(&mut self, path: &Path, mode: UploadMode) -> Result<UploadReport> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let kind = SourceKind::from_name(&name);

        let bytes = read_file(path, kind).await?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
        self.upload_bytes(&name, &bytes, mode)
    }

    /// Apply bytes that were already read. `name` picks the format.
    pub fn upload_bytes(&mut self, name: &str, bytes: &[u8], mode: UploadMode) -> Result<UploadReport> {
        let kind = SourceKind::from_name(name);
        let raw = ingest_bytes(kind, bytes, &self.sheets)?;
        let parsed = raw.len();

        let cleaned = clean_entries(raw);
        if cleaned.is_empty() {
            tracing::warn!("{}: {} raw entries, none usable", name, parsed);
            return Err(IngestError::EmptyResult);
        }
        let kept = cleaned.len();

        let before = self.timetable.len();
        self.timetable = self.timetable.apply(cleaned, mode);
        let after = self.timetable.len();

        tracing::info!(
            "{} ({:?}, {}): parsed {}, kept {}, timetable {} -> {}",
            name,
            kind,
            mode,
            parsed,
            kept,
            before,
            after
        );

        Ok(UploadReport {
            file: name.to_string(),
            mode,
            parsed,
            kept,
            before,
            after,
        })
    }

    /// Current filtered, time-ordered rows
    pub fn view(&self, filter: &Filter) -> Vec<ScheduleEntry> {
        query_view(self.timetable.entries(), filter)
    }

    pub fn summary(&self, filter: &Filter) -> Summary {
        Summary::new(self.timetable.entries(), &self.view(filter))
    }

    /// Write the whole timetable as JSON
    pub async fn export(&self, path: &Path) -> Result<usize> {
        export::write_json(self.timetable.entries(), path).await
    }
}
