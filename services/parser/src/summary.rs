//! Summary counts shown next to the table

use std::collections::HashSet;

use serde::Serialize;

use crate::entry::ScheduleEntry;

/// Collection-wide counts plus the size of the current view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub entries: usize,
    pub days: usize,
    pub sections: usize,
    pub showing: usize,
}

impl Summary {
    pub fn new(all: &[ScheduleEntry], visible: &[ScheduleEntry]) -> Self {
        Self {
            entries: all.len(),
            days: all.iter().map(|e| e.day.as_str()).collect::<HashSet<_>>().len(),
            sections: all.iter().map(|e| e.section.as_str()).collect::<HashSet<_>>().len(),
            showing: visible.len(),
        }
    }
}
