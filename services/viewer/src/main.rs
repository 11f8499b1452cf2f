//! Viewer - Command-line front-end for timetable uploads
//!
//! Responsibilities:
//! - Upload one or more timetable files (CSV or workbook) into a session
//! - Apply day / section / text filters
//! - Print the time-ordered table and summary counts
//! - Export the whole timetable as JSON
//!
//! Usage:
//!   cargo run --bin viewer -- --file week.xlsx
//!   cargo run --bin viewer -- --file a.csv --file b.xlsx --mode merge --day wed --query lab
//!   cargo run --bin viewer -- --file week.xlsx --export

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use timetable_parser::{
    normalize_day, Filter, ScheduleEntry, Session, Summary, UploadMode, EXPORT_FILE_NAME,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "viewer", about = "Loads, filters and exports class timetables")]
struct Args {
    /// Timetable file to upload (.csv, or any workbook format); repeatable
    #[arg(long = "file", required = true)]
    files: Vec<PathBuf>,

    /// How uploads combine with what is already loaded: merge | replace
    #[arg(long)]
    mode: Option<UploadMode>,

    /// Only show this day ("wed", "Wednesday", ... or "all")
    #[arg(long, default_value = "")]
    day: String,

    /// Only show this section code (e.g. BCS-3A)
    #[arg(long, default_value = "")]
    section: String,

    /// Case-insensitive text searched in course, teacher, venue and section
    #[arg(long, default_value = "")]
    query: String,

    /// Print the filtered rows as JSON instead of a table
    #[arg(long, default_value = "false")]
    json: bool,

    /// List the days present in the timetable
    #[arg(long, default_value = "false")]
    list_days: bool,

    /// List the sections present in the timetable
    #[arg(long, default_value = "false")]
    list_sections: bool,

    /// Write the whole timetable as JSON (optionally to PATH)
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    export: Option<Option<PathBuf>>,
}

#[derive(Debug, Clone, PartialEq)]
struct Config {
    export_path: PathBuf,
    upload_mode: UploadMode,
}

impl Config {
    fn from_env() -> Result<Self> {
        Self::from_values(
            std::env::var("TIMETABLE_EXPORT_PATH").ok(),
            std::env::var("TIMETABLE_UPLOAD_MODE").ok(),
        )
    }

    fn from_values(export_path: Option<String>, upload_mode: Option<String>) -> Result<Self> {
        let upload_mode = match upload_mode {
            Some(raw) => raw
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid TIMETABLE_UPLOAD_MODE")?,
            None => UploadMode::default(),
        };
        Ok(Self {
            export_path: PathBuf::from(export_path.unwrap_or_else(|| EXPORT_FILE_NAME.to_string())),
            upload_mode,
        })
    }
}

/// Build the filter from arguments. Day input is normalized so "wed" works.
fn build_filter(args: &Args) -> Filter {
    let day = if args.day.trim().eq_ignore_ascii_case(timetable_parser::view::ALL) {
        String::new()
    } else {
        normalize_day(&args.day)
    };
    Filter {
        day,
        section: args.section.trim().to_string(),
        query: args.query.clone(),
    }
}

/// Fixed-width text table of entries
fn format_table(entries: &[ScheduleEntry]) -> String {
    const HEADERS: [&str; 6] = ["Day", "Time", "Venue", "Course", "Section", "Teacher"];

    let rows: Vec<[&str; 6]> = entries
        .iter()
        .map(|e| {
            [
                e.day.as_str(),
                e.time.as_str(),
                e.venue.as_str(),
                e.course.as_str(),
                e.section.as_str(),
                e.teacher.as_str(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 6]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(HEADERS));
    out.push('\n');
    let total: usize = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
    out.push_str(&format!("{:-<1$}\n", "", total));
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

fn print_summary(summary: &Summary) {
    println!(
        "Showing: {} | Total Entries: {} | Days: {} | Sections: {}",
        summary.showing, summary.entries, summary.days, summary.sections
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let mode = args.mode.unwrap_or(config.upload_mode);

    println!("=== Timetable Viewer ===");
    println!("Mode: {}", mode);

    let mut session = Session::new();
    let mut loaded = 0;
    let mut failed = 0;

    for path in &args.files {
        println!("\n[{}]", path.display());
        match session.upload(path, mode).await {
            Ok(report) => {
                println!(
                    "  ✓ Parsed {} entries, kept {} (timetable {} -> {})",
                    report.parsed, report.kept, report.before, report.after
                );
                loaded += 1;
            }
            Err(e) if e.is_upload_failure() => {
                eprintln!("  ✗ Error: {}", e);
                failed += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Upload of {} aborted", path.display()));
            }
        }
    }

    println!("\nLoaded: {}  Failed: {}", loaded, failed);

    if session.timetable().is_empty() {
        anyhow::bail!("No timetable entries loaded");
    }

    if args.list_days {
        println!("\nDays: {}", session.timetable().days().join(", "));
    }
    if args.list_sections {
        println!("\nSections: {}", session.timetable().sections().join(", "));
    }

    let filter = build_filter(&args);
    tracing::debug!("Filter: {:?}", filter);
    let view = session.view(&filter);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("Failed to serialize view")?
        );
    } else {
        println!();
        print!("{}", format_table(&view));
    }

    println!();
    print_summary(&session.summary(&filter));

    if let Some(target) = args.export {
        let path = target.unwrap_or(config.export_path);
        let count = session
            .export(&path)
            .await
            .with_context(|| format!("Failed to export to {}", path.display()))?;
        println!("\nExported {} entries to {}", count, path.display());
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: &str, time: &str, course: &str) -> ScheduleEntry {
        ScheduleEntry {
            day: day.to_string(),
            time: time.to_string(),
            venue: "Lab1".to_string(),
            course: course.to_string(),
            section: "BCS-3A".to_string(),
            teacher: String::new(),
        }
    }

    // -------------------------------------------------------------------------
    // ARGUMENTS
    // -------------------------------------------------------------------------

    #[test]
    fn test_args_multiple_files_and_mode() {
        let args = Args::try_parse_from([
            "viewer", "--file", "a.csv", "--file", "b.xlsx", "--mode", "replace",
        ])
        .unwrap();
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.mode, Some(UploadMode::Replace));
        assert!(args.export.is_none());
    }

    #[test]
    fn test_args_require_file() {
        assert!(Args::try_parse_from(["viewer"]).is_err());
    }

    #[test]
    fn test_args_bad_mode() {
        assert!(Args::try_parse_from(["viewer", "--file", "a.csv", "--mode", "append"]).is_err());
    }

    #[test]
    fn test_args_export_optional_path() {
        let bare = Args::try_parse_from(["viewer", "--file", "a.csv", "--export"]).unwrap();
        assert_eq!(bare.export, Some(None));

        let with_path =
            Args::try_parse_from(["viewer", "--file", "a.csv", "--export", "out.json"]).unwrap();
        assert_eq!(with_path.export, Some(Some(PathBuf::from("out.json"))));
    }

    // -------------------------------------------------------------------------
    // FILTER
    // -------------------------------------------------------------------------

    #[test]
    fn test_build_filter_normalizes_day() {
        let args =
            Args::try_parse_from(["viewer", "--file", "a.csv", "--day", "wed", "--query", "lab"])
                .unwrap();
        let filter = build_filter(&args);
        assert_eq!(filter.day, "WEDNESDAY");
        assert_eq!(filter.query, "lab");
    }

    #[test]
    fn test_build_filter_all_days() {
        let args = Args::try_parse_from(["viewer", "--file", "a.csv", "--day", "ALL"]).unwrap();
        assert_eq!(build_filter(&args).day, "");
    }

    // -------------------------------------------------------------------------
    // CONFIG
    // -------------------------------------------------------------------------

    #[test]
    fn test_config_defaults() {
        let config = Config::from_values(None, None).unwrap();
        assert_eq!(config.export_path, PathBuf::from(EXPORT_FILE_NAME));
        assert_eq!(config.upload_mode, UploadMode::Merge);
    }

    #[test]
    fn test_config_values() {
        let config =
            Config::from_values(Some("out/tt.json".to_string()), Some("Replace".to_string()))
                .unwrap();
        assert_eq!(config.export_path, PathBuf::from("out/tt.json"));
        assert_eq!(config.upload_mode, UploadMode::Replace);
    }

    #[test]
    fn test_config_invalid_mode_fails() {
        let err = Config::from_values(None, Some("sometimes".to_string())).unwrap_err();
        assert!(err.to_string().contains("TIMETABLE_UPLOAD_MODE"));
    }

    // -------------------------------------------------------------------------
    // TABLE
    // -------------------------------------------------------------------------

    #[test]
    fn test_format_table_aligns_columns() {
        let table = format_table(&[
            entry("MONDAY", "09:00-10:00", "Algorithms"),
            entry("FRIDAY", "8:00-9:00", "AI"),
        ]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Day    | Time        | Venue | Course     |"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with("MONDAY | 09:00-10:00 | Lab1  | Algorithms |"));
        assert!(lines[3].starts_with("FRIDAY | 8:00-9:00   | Lab1  | AI         |"));
    }

    #[test]
    fn test_format_table_empty() {
        let table = format_table(&[]);
        assert_eq!(table.lines().count(), 2);
    }
}
