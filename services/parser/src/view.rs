//! Filtered, time-ordered view of a timetable
//!
//! Nothing is cached: every call recomputes the view from the full entry
//! list and the current filter.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entry::ScheduleEntry;

/// Filter value meaning "no restriction" (same as empty)
pub const ALL: &str = "all";

/// Day / section / free-text filter state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub query: String,
}

fn unrestricted(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case(ALL)
}

impl Filter {
    /// True when the entry passes all three filters
    pub fn matches(&self, entry: &ScheduleEntry) -> bool {
        if !unrestricted(&self.day) && entry.day != self.day {
            return false;
        }
        if !unrestricted(&self.section) && entry.section != self.section {
            return false;
        }

        let query = self.query.trim().to_lowercase();
        query.is_empty()
            || [&entry.course, &entry.teacher, &entry.venue, &entry.section]
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
    }
}

/// `H:M-H:M` with any number of digits per part
static TIME_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+):([0-9]+)-([0-9]+):([0-9]+)").expect("valid time pattern"));

/// Start of a `HH:MM-HH:MM` label in minutes since midnight.
///
/// Spaces are ignored. Labels that do not contain the pattern sort as 0,
/// ahead of every well-formed slot.
pub fn start_minutes(time: &str) -> u32 {
    let compact = time.replace(' ', "");
    let Some(caps) = TIME_RANGE.captures(&compact) else {
        return 0;
    };
    let part = |i: usize| caps[i].parse::<u32>().unwrap_or(u32::MAX);
    part(1).saturating_mul(60).saturating_add(part(2))
}

/// Entries passing `filter`, ordered by start time (stable for ties)
pub fn query_view(entries: &[ScheduleEntry], filter: &Filter) -> Vec<ScheduleEntry> {
    let mut visible: Vec<ScheduleEntry> = entries
        .iter()
        .filter(|entry| filter.matches(entry))
        .cloned()
        .collect();
    visible.sort_by_key(|entry| start_minutes(&entry.time));
    visible
}
