//! Environment configuration

use serde::Serialize;
use thiserror::Error;

use crate::analysis::{MetricRates, SeriesMode, DEFAULT_CALORIES_PER_MINUTE, DEFAULT_STEPS_PER_MINUTE};

pub const STEPS_PER_MINUTE_KEY: &str = "FITNESS_STEPS_PER_MINUTE";
pub const CALORIES_PER_MINUTE_KEY: &str = "FITNESS_CALORIES_PER_MINUTE";
pub const SERIES_MODE_KEY: &str = "FITNESS_SERIES_MODE";
pub const SEED_EXAMPLES_KEY: &str = "FITNESS_SEED_EXAMPLES";

#[derive(Debug, Error, Serialize)]
pub enum ConfigError {
  #[error("Invalid value {value:?} for {key}: {reason}")]
  Invalid {
    key: String,
    value: String,
    reason: String,
  },
}

impl ConfigError {
  fn invalid(key: &str, value: &str, reason: impl Into<String>) -> Self {
    ConfigError::Invalid {
      key: key.to_string(),
      value: value.to_string(),
      reason: reason.into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  pub rates: MetricRates,
  pub series_mode: SeriesMode,
  pub seed_examples: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      rates: MetricRates::default(),
      series_mode: SeriesMode::default(),
      seed_examples: true,
    }
  }
}

impl Config {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_env_with(|k| std::env::var(k).ok())
  }

  /// Reads values through `get` so tests need not touch the process environment
  pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
  where
    F: FnMut(&str) -> Option<String>,
  {
    let steps_per_minute = match get(STEPS_PER_MINUTE_KEY) {
      Some(raw) => parse_rate(STEPS_PER_MINUTE_KEY, &raw)?,
      None => DEFAULT_STEPS_PER_MINUTE,
    };
    let calories_per_minute = match get(CALORIES_PER_MINUTE_KEY) {
      Some(raw) => parse_rate(CALORIES_PER_MINUTE_KEY, &raw)?,
      None => DEFAULT_CALORIES_PER_MINUTE,
    };
    let series_mode = match get(SERIES_MODE_KEY) {
      Some(raw) => raw
        .parse::<SeriesMode>()
        .map_err(|e| ConfigError::invalid(SERIES_MODE_KEY, &raw, e))?,
      None => SeriesMode::default(),
    };
    let seed_examples = match get(SEED_EXAMPLES_KEY) {
      Some(raw) => parse_flag(SEED_EXAMPLES_KEY, &raw)?,
      None => true,
    };

    Ok(Self {
      rates: MetricRates {
        steps_per_minute,
        calories_per_minute,
      },
      series_mode,
      seed_examples,
    })
  }
}

fn parse_rate(key: &str, raw: &str) -> Result<f64, ConfigError> {
  let value: f64 = raw
    .trim()
    .parse()
    .map_err(|_| ConfigError::invalid(key, raw, "not a number"))?;
  if !value.is_finite() || value <= 0.0 {
    return Err(ConfigError::invalid(key, raw, "must be a finite number above zero"));
  }
  Ok(value)
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
  match raw.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Ok(true),
    "0" | "false" | "no" | "off" => Ok(false),
    _ => Err(ConfigError::invalid(key, raw, "expected true or false")),
  }
}
