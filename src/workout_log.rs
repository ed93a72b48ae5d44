//! Append-only workout log
//!
//! The log is a value: `append` hands back a new log and leaves the old one
//! untouched, so a caller can keep the previous state around for diffing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::WorkoutEntry;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutLog {
  entries: Vec<WorkoutEntry>,
}

impl WorkoutLog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Log pre-filled with the example entries shown on first load
  pub fn seeded() -> Self {
    Self {
      entries: example_entries(),
    }
  }

  /// New log with `entry` at the end. Never fails; `entry` is assumed validated.
  #[must_use]
  pub fn append(&self, entry: WorkoutEntry) -> Self {
    let mut entries = Vec::with_capacity(self.entries.len() + 1);
    entries.extend_from_slice(&self.entries);
    entries.push(entry);
    Self { entries }
  }

  /// Oldest first
  pub fn all(&self) -> &[WorkoutEntry] {
    &self.entries
  }

  pub fn iter(&self) -> impl Iterator<Item = &WorkoutEntry> {
    self.entries.iter()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Most recent workout date, regardless of insertion order
  pub fn latest_date(&self) -> Option<NaiveDate> {
    self.entries.iter().map(|e| e.date).max()
  }
}

impl FromIterator<WorkoutEntry> for WorkoutLog {
  fn from_iter<I: IntoIterator<Item = WorkoutEntry>>(iter: I) -> Self {
    Self {
      entries: iter.into_iter().collect(),
    }
  }
}

impl<'a> IntoIterator for &'a WorkoutLog {
  type Item = &'a WorkoutEntry;
  type IntoIter = std::slice::Iter<'a, WorkoutEntry>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.iter()
  }
}

fn example_entries() -> Vec<WorkoutEntry> {
  [(2025, 7, 1, "Running", 30), (2025, 7, 2, "Cycling", 45)]
    .into_iter()
    .filter_map(|(y, m, d, activity, duration)| {
      Some(WorkoutEntry {
        date: NaiveDate::from_ymd_opt(y, m, d)?,
        activity: activity.to_string(),
        duration,
      })
    })
    .collect()
}
