use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A committed workout. Only produced by `validation::validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutEntry {
  pub date: NaiveDate,
  pub activity: String,
  /// Minutes
  pub duration: u32,
}

impl fmt::Display for WorkoutEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} - {} for {} min",
      self.date.format("%Y-%m-%d"),
      self.activity,
      self.duration
    )
  }
}

/// The three form fields, shared by draft edits and validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
  Date,
  Activity,
  Duration,
}

impl DraftField {
  pub fn as_str(&self) -> &'static str {
    match self {
      DraftField::Date => "date",
      DraftField::Activity => "activity",
      DraftField::Duration => "duration",
    }
  }
}

impl fmt::Display for DraftField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for DraftField {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "date" => Ok(Self::Date),
      "activity" => Ok(Self::Activity),
      "duration" => Ok(Self::Duration),
      _ => Err(format!("Unknown draft field: {}", s)),
    }
  }
}

/// In-progress form values, kept as raw text until validated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftEntry {
  #[serde(default)]
  pub date: String,
  #[serde(default)]
  pub activity: String,
  #[serde(default)]
  pub duration: String,
}

impl DraftEntry {
  pub fn new(
    date: impl Into<String>,
    activity: impl Into<String>,
    duration: impl Into<String>,
  ) -> Self {
    Self {
      date: date.into(),
      activity: activity.into(),
      duration: duration.into(),
    }
  }

  pub fn get(&self, field: DraftField) -> &str {
    match field {
      DraftField::Date => &self.date,
      DraftField::Activity => &self.activity,
      DraftField::Duration => &self.duration,
    }
  }

  pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
    let value = value.into();
    match field {
      DraftField::Date => self.date = value,
      DraftField::Activity => self.activity = value,
      DraftField::Duration => self.duration = value,
    }
  }

  pub fn clear(&mut self) {
    *self = Self::default();
  }

  pub fn is_empty(&self) -> bool {
    self.date.is_empty() && self.activity.is_empty() && self.duration.is_empty()
  }
}
