//! JSON export of the whole timetable

use std::path::Path;

use crate::entry::ScheduleEntry;
use crate::error::{IngestError, Result};

/// File name offered for downloads
pub const EXPORT_FILE_NAME: &str = "timetable_data.json";

/// Pretty-printed JSON array of every entry. Refuses an empty timetable.
pub fn to_json(entries: &[ScheduleEntry]) -> Result<String> {
    if entries.is_empty() {
        return Err(IngestError::NothingToExport);
    }
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Write the export to `path`, returning the number of entries written
pub async fn write_json(entries: &[ScheduleEntry], path: &Path) -> Result<usize> {
    let json = to_json(entries)?;
    tokio::fs::write(path, json).await?;
    tracing::info!("Exported {} entries to {}", entries.len(), path.display());
    Ok(entries.len())
}
