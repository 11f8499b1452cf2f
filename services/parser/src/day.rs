//! Weekday normalization
//!
//! Sheet names and CSV cells spell days in many ways ("Mon", "MONDAY ",
//! "tuesday"). Everything is folded onto seven canonical tokens.

/// Canonical weekday tokens, in calendar order
pub const WEEKDAYS: [&str; 7] = [
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
    "SUNDAY",
];

/// Three-letter prefixes tested in priority order, paired with their token
const DAY_PREFIXES: [(&str, &str); 7] = [
    ("MON", "MONDAY"),
    ("TUE", "TUESDAY"),
    ("WED", "WEDNESDAY"),
    ("THU", "THURSDAY"),
    ("FRI", "FRIDAY"),
    ("SAT", "SATURDAY"),
    ("SUN", "SUNDAY"),
];

/// Map a free-text day label to its canonical weekday token.
///
/// The label is trimmed and upper-cased, then searched for each prefix
/// (substring, not exact match). Unrecognized labels come back trimmed and
/// upper-cased rather than rejected; empty input stays empty.
pub fn normalize_day(raw: &str) -> String {
    let label = raw.trim().to_uppercase();
    if label.is_empty() {
        return label;
    }

    DAY_PREFIXES
        .iter()
        .find(|(prefix, _)| label.contains(prefix))
        .map(|(_, day)| day.to_string())
        .unwrap_or(label)
}

/// Position of a token in the week, `None` for non-weekday tokens
pub fn weekday_index(day: &str) -> Option<usize> {
    WEEKDAYS.iter().position(|d| *d == day)
}

/// Order day tokens Monday first. Unrecognized tokens go last, in input order.
pub fn sort_days(days: &[String]) -> Vec<String> {
    let mut sorted = days.to_vec();
    sorted.sort_by_key(|d| weekday_index(d).unwrap_or(WEEKDAYS.len()));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_day_short_forms() {
        assert_eq!(normalize_day("Mon"), "MONDAY");
        assert_eq!(normalize_day("tue"), "TUESDAY");
        assert_eq!(normalize_day("Wed."), "WEDNESDAY");
        assert_eq!(normalize_day("thu"), "THURSDAY");
        assert_eq!(normalize_day("FRI"), "FRIDAY");
        assert_eq!(normalize_day("sat"), "SATURDAY");
        assert_eq!(normalize_day("Sun"), "SUNDAY");
    }

    #[test]
    fn test_normalize_day_casing_and_whitespace() {
        assert_eq!(normalize_day("MONDAY "), "MONDAY");
        assert_eq!(normalize_day("  tuesday"), "TUESDAY");
        assert_eq!(normalize_day("\tWednesday\n"), "WEDNESDAY");
    }

    #[test]
    fn test_normalize_day_substring_match() {
        assert_eq!(normalize_day("Timetable - Thursday"), "THURSDAY");
        assert_eq!(normalize_day("day3-wed"), "WEDNESDAY");
    }

    #[test]
    fn test_normalize_day_priority_order() {
        // Contains both MON and SUN; MON is tested first
        assert_eq!(normalize_day("SUNMON"), "MONDAY");
    }

    #[test]
    fn test_normalize_day_unrecognized_passes_through() {
        assert_eq!(normalize_day(" summary "), "SUMMARY");
        assert_eq!(normalize_day("Labs"), "LABS");
    }

    #[test]
    fn test_normalize_day_empty() {
        assert_eq!(normalize_day(""), "");
        assert_eq!(normalize_day("   "), "");
    }

    #[test]
    fn test_normalize_day_is_idempotent() {
        for day in WEEKDAYS {
            assert_eq!(normalize_day(day), day);
        }
    }

    #[test]
    fn test_sort_days_calendar_order() {
        let days = vec![
            "FRIDAY".to_string(),
            "MONDAY".to_string(),
            "WEDNESDAY".to_string(),
        ];
        assert_eq!(sort_days(&days), vec!["MONDAY", "WEDNESDAY", "FRIDAY"]);
    }

    #[test]
    fn test_sort_days_unknown_last() {
        let days = vec![
            "ZETA".to_string(),
            "TUESDAY".to_string(),
            "ALPHA".to_string(),
            "MONDAY".to_string(),
        ];
        assert_eq!(sort_days(&days), vec!["MONDAY", "TUESDAY", "ZETA", "ALPHA"]);
    }
}
