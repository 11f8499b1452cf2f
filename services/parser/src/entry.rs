//! Schedule entry model

use serde::{Deserialize, Serialize};

/// One class meeting: a course section taught at a venue during a time slot.
///
/// Entries are value objects. Two entries with identical fields are the same
/// entry, which is what deduplication relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day: String,
    pub time: String,
    pub venue: String,
    pub course: String,
    pub section: String,
    pub teacher: String,
}

impl ScheduleEntry {
    /// Copy of this entry with a different `day`
    pub fn with_day(&self, day: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            ..self.clone()
        }
    }

    /// True when this entry can be kept in a timetable
    pub fn is_complete(&self) -> bool {
        !self.day.is_empty() && !self.section.is_empty()
    }
}

/// Strip every plain space from a section code ("BSE 2B" -> "BSE2B")
pub fn compact_section(raw: &str) -> String {
    raw.replace(' ', "")
}
