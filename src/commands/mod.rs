//! Commands the presentation layer sends into the core
//!
//! Each command takes the current session and hands back the next one along
//! with a serializable response.

pub mod dashboard;

use serde::{Deserialize, Serialize};

use crate::models::{DraftEntry, DraftField, WorkoutEntry};
use crate::session::{Dashboard, Session, SubmitOutcome};
use crate::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
  /// Change one form field
  Edit { field: DraftField, value: String },
  /// Replace the whole draft
  SetDraft { draft: DraftEntry },
  /// Submit the current draft
  Submit,
  /// Submit a complete draft in one step
  SubmitWorkout { draft: DraftEntry },
  GetWorkouts,
  GetDashboard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
  Draft { draft: DraftEntry },
  Submitted { outcome: SubmitOutcome },
  Workouts { workouts: Vec<WorkoutEntry> },
  Dashboard { dashboard: Box<Dashboard> },
  Error { message: String },
}

/// Log snapshot, oldest first
pub fn get_workouts(session: &Session) -> Vec<WorkoutEntry> {
  session.log().all().to_vec()
}

/// Validate and commit `draft`. On rejection the session keeps `draft` as its form state.
pub fn submit_workout(
  session: Session,
  draft: DraftEntry,
) -> (Session, Result<WorkoutEntry, ValidationError>) {
  let (session, outcome) = session.with_draft(draft).submit();
  let result = match outcome {
    SubmitOutcome::Committed { entry } => Ok(entry),
    SubmitOutcome::Rejected { error } => Err(error),
  };
  (session, result)
}

pub fn dispatch(session: Session, command: Command) -> (Session, Response) {
  match command {
    Command::Edit { field, value } => {
      let session = session.edit(field, value);
      let draft = session.draft().clone();
      (session, Response::Draft { draft })
    }
    Command::SetDraft { draft } => {
      let session = session.with_draft(draft);
      let draft = session.draft().clone();
      (session, Response::Draft { draft })
    }
    Command::Submit => {
      let (session, outcome) = session.submit();
      (session, Response::Submitted { outcome })
    }
    Command::SubmitWorkout { draft } => {
      let (session, outcome) = session.with_draft(draft).submit();
      (session, Response::Submitted { outcome })
    }
    Command::GetWorkouts => {
      let workouts = get_workouts(&session);
      (session, Response::Workouts { workouts })
    }
    Command::GetDashboard => {
      let dashboard = Box::new(dashboard::get_dashboard(&session));
      (session, Response::Dashboard { dashboard })
    }
  }
}
