//! Session timetable store with merge/replace and deduplication
//!
//! The store is an owned value. `merge` and `replace` build a new
//! `Timetable`, leaving the receiver untouched, so a failed upload never
//! has to roll anything back.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::day::sort_days;
use crate::entry::ScheduleEntry;

/// How a new batch combines with what is already loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    /// Append after the existing entries
    #[default]
    Merge,
    /// Discard the existing entries
    Replace,
}

impl fmt::Display for UploadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadMode::Merge => write!(f, "merge"),
            UploadMode::Replace => write!(f, "replace"),
        }
    }
}

impl FromStr for UploadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "merge" => Ok(UploadMode::Merge),
            "replace" => Ok(UploadMode::Replace),
            other => Err(format!("unknown upload mode '{}' (expected merge or replace)", other)),
        }
    }
}

/// Remove structural duplicates. Each distinct entry stays at the position
/// of its first occurrence.
pub fn dedup_entries(entries: Vec<ScheduleEntry>) -> Vec<ScheduleEntry> {
    let mut seen = HashSet::with_capacity(entries.len());
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}

/// The entry collection of one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timetable {
    entries: Vec<ScheduleEntry>,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries, dropping duplicates
    pub fn from_entries(entries: Vec<ScheduleEntry>) -> Self {
        Self {
            entries: dedup_entries(entries),
        }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The batch alone, deduplicated
    pub fn replace(&self, batch: Vec<ScheduleEntry>) -> Timetable {
        Timetable::from_entries(batch)
    }

    /// Existing entries followed by the batch, deduplicated
    pub fn merge(&self, batch: Vec<ScheduleEntry>) -> Timetable {
        let mut combined = Vec::with_capacity(self.entries.len() + batch.len());
        combined.extend(self.entries.iter().cloned());
        combined.extend(batch);
        Timetable::from_entries(combined)
    }

    /// Apply a batch with the given mode
    pub fn apply(&self, batch: Vec<ScheduleEntry>, mode: UploadMode) -> Timetable {
        match mode {
            UploadMode::Merge => self.merge(batch),
            UploadMode::Replace => self.replace(batch),
        }
    }

    /// Distinct days, Monday first
    pub fn days(&self) -> Vec<String> {
        let mut days: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !days.contains(&entry.day) {
                days.push(entry.day.clone());
            }
        }
        sort_days(&days)
    }

    /// Distinct sections, sorted
    pub fn sections(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.section.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
