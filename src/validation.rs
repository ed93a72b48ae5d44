//! Draft validation
//!
//! Turns raw form text into a `WorkoutEntry`. Fields are checked in form
//! order (date, activity, duration) and the first failure is reported.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::models::{DraftEntry, DraftField, WorkoutEntry};

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationReason {
  Empty,
  Unparseable,
  NonPositive,
}

impl ValidationReason {
  pub fn as_str(&self) -> &'static str {
    match self {
      ValidationReason::Empty => "empty",
      ValidationReason::Unparseable => "unparseable",
      ValidationReason::NonPositive => "non-positive",
    }
  }
}

impl fmt::Display for ValidationReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
  pub field: DraftField,
  pub reason: ValidationReason,
}

impl ValidationError {
  pub fn new(field: DraftField, reason: ValidationReason) -> Self {
    Self { field, reason }
  }
}

/// ---------------------------------------------------------------------------
/// Validation
/// ---------------------------------------------------------------------------

pub fn validate(draft: &DraftEntry) -> Result<WorkoutEntry, ValidationError> {
  let date = parse_date(&draft.date)?;
  let activity = parse_activity(&draft.activity)?;
  let duration = parse_duration(&draft.duration)?;

  Ok(WorkoutEntry {
    date,
    activity,
    duration,
  })
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (its calendar date is kept)
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Err(ValidationError::new(DraftField::Date, ValidationReason::Empty));
  }

  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
    .map_err(|_| ValidationError::new(DraftField::Date, ValidationReason::Unparseable))
}

fn parse_activity(raw: &str) -> Result<String, ValidationError> {
  let activity = raw.trim();
  if activity.is_empty() {
    return Err(ValidationError::new(DraftField::Activity, ValidationReason::Empty));
  }
  Ok(activity.to_string())
}

/// Whole minutes, strictly positive, fitting in u32
pub fn parse_duration(raw: &str) -> Result<u32, ValidationError> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Err(ValidationError::new(DraftField::Duration, ValidationReason::Empty));
  }

  let unparseable = ValidationError::new(DraftField::Duration, ValidationReason::Unparseable);

  // Parsed wide; the u32 range is checked below
  let value: i128 = match raw.parse() {
    Ok(v) => v,
    Err(_) if is_signed_integer(raw) => {
      // Beyond i128: only the sign matters
      return Err(if raw.starts_with('-') {
        ValidationError::new(DraftField::Duration, ValidationReason::NonPositive)
      } else {
        unparseable
      });
    }
    Err(_) => return Err(unparseable),
  };

  if value <= 0 {
    return Err(ValidationError::new(DraftField::Duration, ValidationReason::NonPositive));
  }

  u32::try_from(value).map_err(|_| unparseable)
}

fn is_signed_integer(raw: &str) -> bool {
  let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
  !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
