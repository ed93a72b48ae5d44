//! Test utilities and helpers for unit testing
//!
//! Mock data factories for entries, drafts, logs and sessions.

use chrono::NaiveDate;

use crate::analysis::MetricsAggregator;
use crate::models::{DraftEntry, WorkoutEntry};
use crate::session::Session;
use crate::workout_log::WorkoutLog;

/// Parse a `YYYY-MM-DD` literal
pub fn date(s: &str) -> NaiveDate {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date literal")
}

/// Create a committed entry without going through validation
pub fn mock_entry(day: &str, activity: &str, duration: u32) -> WorkoutEntry {
  WorkoutEntry {
    date: date(day),
    activity: activity.to_string(),
    duration,
  }
}

pub fn mock_draft(day: &str, activity: &str, duration: &str) -> DraftEntry {
  DraftEntry::new(day, activity, duration)
}

/// Build a log from `(date, activity, minutes)` rows, in order
pub fn log_of(rows: &[(&str, &str, u32)]) -> WorkoutLog {
  rows
    .iter()
    .map(|(day, activity, duration)| mock_entry(day, activity, *duration))
    .collect()
}

/// Session holding the two example workouts, default rates, derived charts
pub fn seeded_session() -> Session {
  Session::new(WorkoutLog::seeded(), MetricsAggregator::default())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_log_of_keeps_row_order() {
    let log = log_of(&[("2025-07-02", "Cycling", 45), ("2025-07-01", "Running", 30)]);
    assert_eq!(log.all()[0].activity, "Cycling");
    assert_eq!(log.all()[1].duration, 30);
  }

  #[test]
  fn test_seeded_session_matches_seeded_log() {
    assert_eq!(seeded_session().log(), &WorkoutLog::seeded());
  }
}
