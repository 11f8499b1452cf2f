//! Tidy CSV ingestion
//!
//! Expected layout: a header line naming `day,time,venue,course,section,teacher`
//! in any order or case, then one class meeting per line.
//!
//! Quoting is deliberately off: a `"` is an ordinary character and a comma
//! always separates fields, so `"Smith, J."` splits into two columns.
//! A record ends at `\n`, `\r\n` or a lone `\r`.
//!
//! This function is DETERMINISTIC: same content = same entries, same order.

use std::collections::HashMap;

use crate::entry::{compact_section, ScheduleEntry};

/// Column names recognized in the header line (after trim + lowercase)
pub const CSV_COLUMNS: [&str; 6] = ["day", "time", "venue", "course", "section", "teacher"];

/// Header name -> column index, first occurrence wins
struct ColumnMapping {
    index: HashMap<String, usize>,
}

impl ColumnMapping {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut index = HashMap::new();
        for (idx, name) in headers.iter().enumerate() {
            index.entry(name.trim().to_lowercase()).or_insert(idx);
        }
        Self { index }
    }

    /// Recognized columns absent from the header
    fn missing(&self) -> Vec<&'static str> {
        CSV_COLUMNS
            .iter()
            .copied()
            .filter(|col| !self.index.contains_key(*col))
            .collect()
    }

    /// Field value for a named column, empty when the column or cell is missing
    fn field(&self, record: &csv::StringRecord, column: &str) -> String {
        self.index
            .get(column)
            .and_then(|&idx| record.get(idx))
            .unwrap_or_default()
            .to_string()
    }
}

/// Parse CSV text into raw (uncleaned) entries.
///
/// Empty content yields no entries. Rows with missing columns produce entries
/// with empty fields instead of failing the file.
pub fn parse_csv(content: &str) -> Vec<ScheduleEntry> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let mapping = match reader.headers() {
        Ok(headers) => ColumnMapping::from_headers(headers),
        Err(e) => {
            tracing::warn!("CSV header unreadable: {}", e);
            return Vec::new();
        }
    };

    let missing = mapping.missing();
    if !missing.is_empty() {
        tracing::debug!("CSV header lacks columns {:?}; those fields stay empty", missing);
    }

    let mut entries = Vec::new();
    for (line_num, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Skipping CSV record {}: {}", line_num + 2, e);
                continue;
            }
        };

        entries.push(ScheduleEntry {
            day: mapping.field(&record, "day"),
            time: mapping.field(&record, "time"),
            venue: mapping.field(&record, "venue"),
            course: mapping.field(&record, "course"),
            section: compact_section(&mapping.field(&record, "section")),
            teacher: mapping.field(&record, "teacher"),
        });
    }

    tracing::debug!("Parsed {} CSV rows", entries.len());
    entries
}
