//! Workbook ingestion - one sheet per weekday
//!
//! Each sheet is rendered to a grid of strings, the layout detector locates
//! the time-slot header and the venue block, and every occupied cell is split
//! into course, section and teacher.
//!
//! Cell format:
//!
//! ```text
//! Databases BSE-2B      <- course title followed by section code
//! Dr. Khan              <- teacher (optional)
//! ```
//!
//! A sheet whose name does not normalize to anything is skipped. Cells
//! without a section code are skipped. Neither is an error.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};
use chrono::{NaiveDateTime, NaiveTime};

use crate::day::normalize_day;
use crate::entry::ScheduleEntry;
use crate::error::{IngestError, Result};
use crate::layout::{cell, DefaultLayout, Grid, LayoutDetector};
use crate::section::SectionMatcher;

/// Fixed message for any workbook that cannot be opened
pub const WORKBOOK_READ_ERROR: &str = "Failed to read Excel file.";

/// Convert a calamine cell to its display text.
///
/// Date and time cells are shown as text rather than Excel serial numbers:
/// a time of day as `HH:MM`, a duration as `H:MM` (hours may exceed 24),
/// a date as `YYYY-MM-DD`, a full timestamp as `YYYY-MM-DD HH:MM`.
fn cell_to_string(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::DateTime(dt) if dt.is_duration() => data
            .as_duration()
            .map(duration_text)
            .unwrap_or_else(|| dt.to_string()),
        // Serials below one day carry no date part
        Data::DateTime(dt) if dt.as_f64() < 1.0 => data
            .as_time()
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| dt.to_string()),
        Data::DateTime(dt) => data
            .as_datetime()
            .map(datetime_text)
            .unwrap_or_else(|| dt.to_string()),
        Data::DateTimeIso(s) => data
            .as_datetime()
            .map(datetime_text)
            .or_else(|| data.as_time().map(|t| t.format("%H:%M").to_string()))
            .or_else(|| data.as_date().map(|d| d.format("%Y-%m-%d").to_string()))
            .unwrap_or_else(|| s.clone()),
        Data::DurationIso(s) => data
            .as_duration()
            .map(duration_text)
            .unwrap_or_else(|| s.clone()),
        other => format!("{}", other),
    }
}

fn datetime_text(dt: NaiveDateTime) -> String {
    if dt.time() == NaiveTime::MIN {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M").to_string()
    }
}

fn duration_text(duration: chrono::Duration) -> String {
    let minutes = duration.num_minutes();
    format!("{}:{:02}", minutes / 60, (minutes % 60).abs())
}

/// Render a sheet's used range row-major, blank cells as empty strings
pub fn render_range(range: &Range<Data>) -> Vec<Vec<String>> {
    range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect()
}

/// Spreadsheet ingester with a pluggable layout
pub struct SheetIngester {
    layout: Box<dyn LayoutDetector + Send + Sync>,
    sections: SectionMatcher,
}

impl Default for SheetIngester {
    fn default() -> Self {
        Self::new(DefaultLayout::default(), SectionMatcher::default())
    }
}

impl SheetIngester {
    pub fn new(layout: impl LayoutDetector + Send + Sync + 'static, sections: SectionMatcher) -> Self {
        Self {
            layout: Box::new(layout),
            sections,
        }
    }

    /// Parse workbook bytes (xlsx, xls, xlsb or ods) into raw entries.
    ///
    /// This function is DETERMINISTIC: same workbook = same entries.
    pub fn parse_workbook(&self, bytes: &[u8]) -> Result<Vec<ScheduleEntry>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(|e| {
            tracing::warn!("Workbook rejected: {}", e);
            IngestError::read(WORKBOOK_READ_ERROR)
        })?;

        let sheet_names = workbook.sheet_names().to_vec();
        tracing::debug!("Workbook has {} sheets", sheet_names.len());

        let mut entries = Vec::new();
        for sheet_name in &sheet_names {
            let day = normalize_day(sheet_name);
            if day.is_empty() {
                tracing::debug!("Skipping sheet '{}': no day", sheet_name);
                continue;
            }

            let range = match workbook.worksheet_range(sheet_name) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!("Skipping sheet '{}': {}", sheet_name, e);
                    continue;
                }
            };

            let grid = render_range(&range);
            let found = self.extract_sheet(&day, &grid);
            tracing::debug!(
                "Sheet '{}' ({}): {} rows, {} entries",
                sheet_name,
                day,
                grid.len(),
                found.len()
            );
            entries.extend(found);
        }

        Ok(entries)
    }

    /// Pull every schedule entry out of one rendered weekday sheet
    pub fn extract_sheet(&self, day: &str, grid: &Grid) -> Vec<ScheduleEntry> {
        if grid.is_empty() {
            return Vec::new();
        }

        let header_row = self.layout.time_header_row(grid);
        let times = self.layout.time_columns(grid, header_row);
        let start = self.layout.venue_block_start(grid, header_row);

        let mut entries = Vec::new();
        let mut skipped = 0;

        for row in start..grid.len() {
            let venue = cell(grid, row, 0).trim();
            if venue.is_empty() || self.layout.is_section_header(venue) {
                continue;
            }

            for (col, time) in &times {
                let raw = cell(grid, row, *col).trim();
                if raw.is_empty() {
                    continue;
                }

                match self.parse_cell(raw) {
                    Some((course, section, teacher)) => entries.push(ScheduleEntry {
                        day: day.to_string(),
                        time: time.clone(),
                        venue: venue.to_string(),
                        course,
                        section,
                        teacher,
                    }),
                    None => skipped += 1,
                }
            }
        }

        if skipped > 0 {
            tracing::debug!("{}: skipped {} cells without course or section", day, skipped);
        }
        entries
    }

    /// Split a cell into (course, section, teacher); `None` when either the
    /// course or the section cannot be found
    fn parse_cell(&self, raw: &str) -> Option<(String, String, String)> {
        let mut lines = raw.lines();
        let first = lines.next().unwrap_or("").trim();
        let teacher = lines.next().unwrap_or("").trim().to_string();

        let found = self.sections.split(first)?;
        if found.course.is_empty() || found.section.is_empty() {
            return None;
        }
        Some((found.course, found.section, teacher))
    }
}

/// Parse workbook bytes with the default layout and section grammar
pub fn parse_workbook(bytes: &[u8]) -> Result<Vec<ScheduleEntry>> {
    SheetIngester::default().parse_workbook(bytes)
}
