pub mod analysis;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod validation;
pub mod workout_log;

#[cfg(test)]
mod test_utils;

use std::io::{BufRead, Write};

pub use analysis::{MetricRates, MetricsAggregator, SeriesMode, WeeklyMetrics};
pub use commands::{dispatch, Command, Response};
pub use config::{Config, ConfigError};
pub use error::{AppError, AppResult};
pub use models::{DraftEntry, DraftField, WeeklySeries, WorkoutEntry};
pub use session::{Dashboard, Session, SubmitOutcome};
pub use validation::{validate, ValidationError, ValidationReason};
pub use workout_log::WorkoutLog;

pub const LOG_LEVEL_KEY: &str = "FITNESS_LOG_LEVEL";

/// Run the session driver on stdin/stdout until input ends
pub fn run() -> AppResult<()> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  init_logging();

  let config = Config::from_env()?;
  tracing::info!(
    steps_per_minute = config.rates.steps_per_minute,
    calories_per_minute = config.rates.calories_per_minute,
    series_mode = %config.series_mode,
    seed_examples = config.seed_examples,
    "session starting"
  );

  let session = build_session(&config);
  let stdin = std::io::stdin();
  let stdout = std::io::stdout();
  let session = serve(stdin.lock(), stdout.lock(), session)?;

  tracing::info!(workouts = session.log().len(), "session ended");
  Ok(())
}

/// `FITNESS_LOG_LEVEL`, then `RUST_LOG`, then `info`. Logs go to stderr.
fn init_logging() {
  let log_env = std::env::var(LOG_LEVEL_KEY)
    .or_else(|_| std::env::var("RUST_LOG"))
    .unwrap_or_else(|_| "info".to_string());

  let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
  // try_init: a subscriber may already be installed
  let _ = tracing_subscriber::fmt()
    .compact()
    .with_writer(std::io::stderr)
    .with_ansi(false)
    .with_target(false)
    .with_env_filter(env_filter)
    .try_init();
}

pub fn build_session(config: &Config) -> Session {
  let log = if config.seed_examples {
    WorkoutLog::seeded()
  } else {
    WorkoutLog::new()
  };
  Session::new(log, MetricsAggregator::new(config.rates, config.series_mode))
}

/// One JSON `Command` per input line, one JSON `Response` per output line.
/// Blank lines are skipped; malformed lines get an error response.
pub fn serve<R, W>(input: R, mut output: W, mut session: Session) -> AppResult<Session>
where
  R: BufRead,
  W: Write,
{
  for line in input.lines() {
    let line = line?;
    let line = line.trim();
    if line.is_empty() {
      continue;
    }

    let response = match serde_json::from_str::<Command>(line) {
      Ok(command) => {
        let (next, response) = dispatch(session, command);
        session = next;
        response
      }
      Err(e) => {
        tracing::warn!(error = %e, "malformed command");
        Response::Error {
          message: format!("Malformed command: {}", e),
        }
      }
    };

    serde_json::to_writer(&mut output, &response)?;
    output.write_all(b"\n")?;
    output.flush()?;
  }

  Ok(session)
}
