//! Draft/commit state machine for one user session
//!
//! `Editing` -> `Submitting` -> `Committed` | `Rejected` -> `Editing`
//!
//! A `Session` is a value. Transitions consume the current session and
//! return the next one together with what happened.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::{MetricsAggregator, WeekSummary, WeeklyMetrics};
use crate::models::{ChartPanel, DraftEntry, DraftField, WorkoutEntry};
use crate::validation::{validate, ValidationError};
use crate::workout_log::WorkoutLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
  #[default]
  Editing,
  Submitting,
}

/// Result of a submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
  Committed { entry: WorkoutEntry },
  Rejected { error: ValidationError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
  log: WorkoutLog,
  draft: DraftEntry,
  phase: FormPhase,
  last_error: Option<ValidationError>,
  aggregator: MetricsAggregator,
}

impl Session {
  pub fn new(log: WorkoutLog, aggregator: MetricsAggregator) -> Self {
    Self {
      log,
      draft: DraftEntry::default(),
      phase: FormPhase::Editing,
      last_error: None,
      aggregator,
    }
  }

  pub fn log(&self) -> &WorkoutLog {
    &self.log
  }

  pub fn draft(&self) -> &DraftEntry {
    &self.draft
  }

  pub fn phase(&self) -> FormPhase {
    self.phase
  }

  /// Error from the last rejected submit, cleared by the next successful one
  pub fn last_error(&self) -> Option<&ValidationError> {
    self.last_error.as_ref()
  }

  pub fn aggregator(&self) -> &MetricsAggregator {
    &self.aggregator
  }

  /// Update one draft field
  #[must_use]
  pub fn edit(mut self, field: DraftField, value: impl Into<String>) -> Self {
    let value = value.into();
    tracing::debug!(field = %field, "draft edited");
    self.draft.set(field, value);
    self
  }

  /// Replace the whole draft, as a form posting all fields at once would
  #[must_use]
  pub fn with_draft(mut self, draft: DraftEntry) -> Self {
    self.draft = draft;
    self
  }

  /// Validate the draft and, on success, append it to the log
  pub fn submit(mut self) -> (Self, SubmitOutcome) {
    self.phase = FormPhase::Submitting;

    let outcome = match validate(&self.draft) {
      Ok(entry) => {
        tracing::info!(
          date = %entry.date,
          activity = %entry.activity,
          duration = entry.duration,
          "workout committed"
        );
        self.log = self.log.append(entry.clone());
        self.draft.clear();
        self.last_error = None;
        SubmitOutcome::Committed { entry }
      }
      Err(error) => {
        tracing::warn!(field = %error.field, reason = %error.reason, "workout rejected");
        self.last_error = Some(error);
        SubmitOutcome::Rejected { error }
      }
    };

    self.phase = FormPhase::Editing;
    (self, outcome)
  }

  pub fn metrics(&self) -> WeeklyMetrics {
    self.aggregator.aggregate(&self.log)
  }

  pub fn metrics_at(&self, today: NaiveDate) -> WeeklyMetrics {
    self.aggregator.aggregate_at(&self.log, today)
  }

  /// Everything the presentation layer needs for one render
  pub fn dashboard(&self) -> Dashboard {
    Dashboard::build(self, self.metrics())
  }

  pub fn dashboard_at(&self, today: NaiveDate) -> Dashboard {
    Dashboard::build(self, self.metrics_at(today))
  }
}

impl Default for Session {
  fn default() -> Self {
    Self::new(WorkoutLog::new(), MetricsAggregator::default())
  }
}

/// ---------------------------------------------------------------------------
/// Render snapshot
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
  pub workouts: Vec<WorkoutEntry>,
  pub history: Vec<String>,
  pub steps: ChartPanel,
  pub calories: ChartPanel,
  pub week: WeekSummary,
  pub draft: DraftEntry,
  pub phase: FormPhase,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<ValidationError>,
}

impl Dashboard {
  fn build(session: &Session, metrics: WeeklyMetrics) -> Self {
    Self {
      workouts: session.log.all().to_vec(),
      history: session.log.iter().map(|e| e.to_string()).collect(),
      steps: metrics.steps_panel(),
      calories: metrics.calories_panel(),
      week: metrics.week,
      draft: session.draft.clone(),
      phase: session.phase,
      error: session.last_error,
    }
  }
}
