//! Sheet layout detection
//!
//! Timetable workbooks are laid out by hand. The default detector encodes the
//! common shape:
//!
//! ```text
//! row 0..  title rows
//! row t    "Venues/Time" | 08:30-09:50 | 10:00-11:20 | ...
//! row c    "CLASSROOMS"                              (optional marker)
//! row c+1  Room 1        | cell        | cell        | ...
//!          "LABS"                                    (section header, skipped)
//!          Lab 2         | cell        | cell        | ...
//! ```
//!
//! Alternate layouts implement [`LayoutDetector`] and are handed to the
//! spreadsheet ingester; the extraction loop itself never changes.

/// Marker searched (case-insensitively) in column 0 of the time-header row
pub const TIME_HEADER_MARKER: &str = "venues/time";

/// Row used as the time header when no marker row exists. This is a guess
/// for irregular sheets and can pick the wrong row.
pub const FALLBACK_TIME_HEADER_ROW: usize = 2;

/// Marker (upper-case) opening the venue block
pub const CLASSROOMS_MARKER: &str = "CLASSROOMS";

/// Column-0 labels that head a group of venues rather than name one
pub const SECTION_HEADER_LABELS: [&str; 2] = ["LABS", "CLASSROOMS"];

/// Rendered sheet: rows of cells, blank cells as empty strings
pub type Grid = [Vec<String>];

/// Text of a cell, empty when the row is short or missing
pub fn cell(grid: &Grid, row: usize, col: usize) -> &str {
    grid.get(row)
        .and_then(|r| r.get(col))
        .map(String::as_str)
        .unwrap_or("")
}

/// Finds where the interesting parts of a weekday sheet are
pub trait LayoutDetector {
    /// Row holding the time-slot labels
    fn time_header_row(&self, grid: &Grid) -> usize;

    /// First row of venue data
    fn venue_block_start(&self, grid: &Grid, time_header_row: usize) -> usize;

    /// True when a column-0 label heads a group instead of naming a venue
    fn is_section_header(&self, venue: &str) -> bool;

    /// Column -> time-slot label, read from the time-header row.
    /// Column 0 holds venue names and is never a time slot.
    fn time_columns(&self, grid: &Grid, time_header_row: usize) -> Vec<(usize, String)> {
        grid.get(time_header_row)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .skip(1)
                    .map(|(col, label)| (col, label.trim().to_string()))
                    .filter(|(_, label)| !label.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Marker-driven layout with a fixed fallback header row
#[derive(Debug, Clone)]
pub struct DefaultLayout {
    pub time_header_marker: String,
    pub fallback_time_header_row: usize,
    pub block_marker: String,
    pub section_headers: Vec<String>,
}

impl Default for DefaultLayout {
    fn default() -> Self {
        Self {
            time_header_marker: TIME_HEADER_MARKER.to_string(),
            fallback_time_header_row: FALLBACK_TIME_HEADER_ROW,
            block_marker: CLASSROOMS_MARKER.to_string(),
            section_headers: SECTION_HEADER_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DefaultLayout {
    fn find_row(grid: &Grid, pred: impl Fn(&str) -> bool) -> Option<usize> {
        grid.iter()
            .position(|row| pred(row.first().map(String::as_str).unwrap_or("")))
    }
}

impl LayoutDetector for DefaultLayout {
    fn time_header_row(&self, grid: &Grid) -> usize {
        let marker = self.time_header_marker.to_lowercase();
        Self::find_row(grid, |first| first.to_lowercase().contains(&marker))
            .unwrap_or(self.fallback_time_header_row)
    }

    fn venue_block_start(&self, grid: &Grid, time_header_row: usize) -> usize {
        let marker = self.block_marker.to_uppercase();
        Self::find_row(grid, |first| first.to_uppercase().contains(&marker))
            .map(|row| row + 1)
            .unwrap_or(time_header_row + 1)
    }

    fn is_section_header(&self, venue: &str) -> bool {
        let venue = venue.to_uppercase();
        self.section_headers
            .iter()
            .any(|label| label.to_uppercase() == venue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_time_header_by_marker() {
        let g = grid(&[
            &["University Timetable"],
            &["Venues/Time", "08:00-09:00", "09:00-10:00"],
            &["Room 1", "x", ""],
        ]);
        assert_eq!(DefaultLayout::default().time_header_row(&g), 1);
    }

    #[test]
    fn test_time_header_marker_case_insensitive_substring() {
        let g = grid(&[&["  VENUES/TIME slots", "a"]]);
        assert_eq!(DefaultLayout::default().time_header_row(&g), 0);
    }

    #[test]
    fn test_time_header_fallback() {
        let g = grid(&[&["a"], &["b"], &["c"], &["d"]]);
        assert_eq!(
            DefaultLayout::default().time_header_row(&g),
            FALLBACK_TIME_HEADER_ROW
        );
    }

    #[test]
    fn test_block_start_after_classrooms_marker() {
        let g = grid(&[
            &["Venues/Time", "08:00-09:00"],
            &["note"],
            &["Classrooms"],
            &["Room 1", "x"],
        ]);
        let layout = DefaultLayout::default();
        let header = layout.time_header_row(&g);
        assert_eq!(layout.venue_block_start(&g, header), 3);
    }

    #[test]
    fn test_block_start_defaults_to_after_header() {
        let g = grid(&[&["title"], &["Venues/Time", "08:00-09:00"], &["Room 1"]]);
        let layout = DefaultLayout::default();
        assert_eq!(layout.venue_block_start(&g, 1), 2);
    }

    #[test]
    fn test_time_columns_skip_column_zero_and_blanks() {
        let g = grid(&[&["Venues/Time", " 08:00-09:00 ", "", "10:00-11:00"]]);
        let cols = DefaultLayout::default().time_columns(&g, 0);
        assert_eq!(
            cols,
            vec![(1, "08:00-09:00".to_string()), (3, "10:00-11:00".to_string())]
        );
    }

    #[test]
    fn test_time_columns_missing_row() {
        let g = grid(&[&["only row"]]);
        assert!(DefaultLayout::default().time_columns(&g, 5).is_empty());
    }

    #[test]
    fn test_section_headers() {
        let layout = DefaultLayout::default();
        assert!(layout.is_section_header("labs"));
        assert!(layout.is_section_header("CLASSROOMS"));
        assert!(!layout.is_section_header("Lab 2"));
    }

    #[test]
    fn test_cell_out_of_bounds() {
        let g = grid(&[&["a", "b"]]);
        assert_eq!(cell(&g, 0, 1), "b");
        assert_eq!(cell(&g, 0, 9), "");
        assert_eq!(cell(&g, 3, 0), "");
    }
}
