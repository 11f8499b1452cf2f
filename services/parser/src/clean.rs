//! Entry cleaning: canonical days, drop incomplete rows

use crate::day::normalize_day;
use crate::entry::ScheduleEntry;

/// Normalize every entry's day and keep only entries with a day and a
/// section. Survivors keep their relative order.
pub fn clean_entries(raw: Vec<ScheduleEntry>) -> Vec<ScheduleEntry> {
    let before = raw.len();
    let cleaned: Vec<ScheduleEntry> = raw
        .into_iter()
        .map(|entry| entry.with_day(normalize_day(&entry.day)))
        .filter(ScheduleEntry::is_complete)
        .collect();

    if cleaned.len() < before {
        tracing::debug!("Dropped {} incomplete entries", before - cleaned.len());
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: &str, section: &str) -> ScheduleEntry {
        ScheduleEntry {
            day: day.to_string(),
            section: section.to_string(),
            course: format!("{day}/{section}"),
            ..Default::default()
        }
    }

    #[test]
    fn test_days_normalized() {
        let cleaned = clean_entries(vec![entry(" mon ", "BCS1"), entry("Friday", "BCS2")]);
        assert_eq!(cleaned[0].day, "MONDAY");
        assert_eq!(cleaned[1].day, "FRIDAY");
    }

    #[test]
    fn test_unrecognized_day_kept_uppercased() {
        let cleaned = clean_entries(vec![entry("holiday", "BCS1")]);
        assert_eq!(cleaned[0].day, "HOLIDAY");
    }

    #[test]
    fn test_incomplete_entries_dropped() {
        let cleaned = clean_entries(vec![
            entry("", "BCS1"),
            entry("  ", "BCS2"),
            entry("Tue", ""),
            entry("Wed", "BCS3"),
        ]);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].section, "BCS3");
        assert!(cleaned.iter().all(ScheduleEntry::is_complete));
    }

    #[test]
    fn test_order_preserved() {
        let cleaned = clean_entries(vec![
            entry("Sun", "S1"),
            entry("", "S2"),
            entry("Mon", "S3"),
            entry("Sat", "S4"),
        ]);
        let sections: Vec<&str> = cleaned.iter().map(|e| e.section.as_str()).collect();
        assert_eq!(sections, vec!["S1", "S3", "S4"]);
    }

    #[test]
    fn test_other_fields_untouched() {
        let raw = ScheduleEntry {
            day: "thu".to_string(),
            time: " 08:00 - 09:00 ".to_string(),
            venue: " Lab1".to_string(),
            course: "AI".to_string(),
            section: "BCS-6A".to_string(),
            teacher: "Dr. X ".to_string(),
        };
        let cleaned = clean_entries(vec![raw.clone()]);
        assert_eq!(cleaned[0], raw.with_day("THURSDAY"));
    }
}
