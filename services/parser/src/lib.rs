//! Timetable Parser - Turns timetable exports into clean schedule entries
//!
//! Responsibilities:
//! - Read CSV and workbook uploads
//! - Normalize weekdays and extract section codes
//! - Merge or replace the session timetable, dropping duplicates
//! - Filter, sort, summarize and export the result
//!
//! CRITICAL: Ingestion must be DETERMINISTIC
//! Same file = same entries, in the same order

pub mod clean;
pub mod csv_ingest;
pub mod day;
pub mod entry;
pub mod error;
pub mod export;
pub mod layout;
pub mod section;
pub mod session;
pub mod sheet_ingest;
pub mod source;
pub mod store;
pub mod summary;
pub mod view;

pub use clean::clean_entries;
pub use csv_ingest::parse_csv;
pub use day::{normalize_day, sort_days, WEEKDAYS};
pub use entry::ScheduleEntry;
pub use error::{IngestError, Result};
pub use export::EXPORT_FILE_NAME;
pub use layout::{DefaultLayout, LayoutDetector};
pub use section::{SectionGrammar, SectionMatcher};
pub use session::{Session, UploadReport};
pub use sheet_ingest::{parse_workbook, SheetIngester};
pub use source::SourceKind;
pub use store::{Timetable, UploadMode};
pub use summary::Summary;
pub use view::{query_view, Filter};
