//! Deterministic metrics layer for the weekly charts
//!
//! Derives the steps and calories series from the workout log. Nothing is
//! cached between calls: the same log always yields the same output.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{ChartPanel, Metric, WeeklySeries};
use crate::workout_log::WorkoutLog;

/// ---------------------------------------------------------------------------
/// Metric Rates (needed for metric calculations)
/// ---------------------------------------------------------------------------

pub const DEFAULT_STEPS_PER_MINUTE: f64 = 100.0;
pub const DEFAULT_CALORIES_PER_MINUTE: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRates {
  pub steps_per_minute: f64,
  pub calories_per_minute: f64,
}

impl Default for MetricRates {
  fn default() -> Self {
    Self {
      steps_per_minute: DEFAULT_STEPS_PER_MINUTE,
      calories_per_minute: DEFAULT_CALORIES_PER_MINUTE,
    }
  }
}

impl MetricRates {
  pub fn per_minute(&self, metric: Metric) -> f64 {
    match metric {
      Metric::Steps => self.steps_per_minute,
      Metric::Calories => self.calories_per_minute,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Series Mode
/// ---------------------------------------------------------------------------

/// Where chart data comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMode {
  /// Bucketed from the workout log
  #[default]
  Derived,
  /// Fixed sample data, independent of the log
  Illustrative,
}

impl std::fmt::Display for SeriesMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Derived => write!(f, "derived"),
      Self::Illustrative => write!(f, "illustrative"),
    }
  }
}

impl std::str::FromStr for SeriesMode {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "derived" => Ok(Self::Derived),
      "illustrative" => Ok(Self::Illustrative),
      _ => Err(format!("Unknown series mode: {}", s)),
    }
  }
}

const ILLUSTRATIVE_STEPS: [f64; 7] = [5000.0, 8000.0, 7500.0, 6000.0, 9000.0, 10000.0, 11000.0];
const ILLUSTRATIVE_CALORIES: [f64; 7] = [200.0, 300.0, 250.0, 270.0, 400.0, 500.0, 550.0];

/// ---------------------------------------------------------------------------
/// Week Window
/// ---------------------------------------------------------------------------

/// Monday through Sunday of the charted week (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
  pub start: NaiveDate,
  pub end: NaiveDate,
}

impl WeekWindow {
  /// The calendar week containing `anchor`. Clamped at the ends of the date range.
  pub fn containing(anchor: NaiveDate) -> Self {
    let offset = u64::from(anchor.weekday().num_days_from_monday());
    let start = anchor
      .checked_sub_days(Days::new(offset))
      .unwrap_or(NaiveDate::MIN);
    let end = start
      .checked_add_days(Days::new(6))
      .unwrap_or(NaiveDate::MAX);
    Self { start, end }
  }

  pub fn contains(&self, date: NaiveDate) -> bool {
    self.start <= date && date <= self.end
  }

  /// Weekday slot (Mon = 0 .. Sun = 6) for dates inside the window
  pub fn slot(&self, date: NaiveDate) -> Option<usize> {
    if !self.contains(date) {
      return None;
    }
    Some(date.weekday().num_days_from_monday() as usize)
  }
}

/// ---------------------------------------------------------------------------
/// Weekly Metrics
/// ---------------------------------------------------------------------------

/// What the week window holds, independent of the charted metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSummary {
  pub week_start: NaiveDate,
  pub week_end: NaiveDate,
  pub total_minutes: u64,
  pub workout_count: usize,
  /// Minutes per activity label, as logged
  pub minutes_by_activity: BTreeMap<String, u64>,
  /// Minutes per weekday slot
  pub daily_minutes: [u64; 7],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMetrics {
  pub mode: SeriesMode,
  pub week: WeekSummary,
  pub steps: WeeklySeries,
  pub calories: WeeklySeries,
}

impl WeeklyMetrics {
  pub fn series(&self, metric: Metric) -> WeeklySeries {
    match metric {
      Metric::Steps => self.steps,
      Metric::Calories => self.calories,
    }
  }

  pub fn steps_panel(&self) -> ChartPanel {
    ChartPanel::new(Metric::Steps, self.steps)
  }

  pub fn calories_panel(&self) -> ChartPanel {
    ChartPanel::new(Metric::Calories, self.calories)
  }
}

/// ---------------------------------------------------------------------------
/// Aggregator
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricsAggregator {
  pub rates: MetricRates,
  pub mode: SeriesMode,
}

impl MetricsAggregator {
  pub fn new(rates: MetricRates, mode: SeriesMode) -> Self {
    Self { rates, mode }
  }

  /// Aggregate, falling back to today's local date when the log is empty
  pub fn aggregate(&self, log: &WorkoutLog) -> WeeklyMetrics {
    self.aggregate_at(log, Local::now().date_naive())
  }

  /// Aggregate with an explicit fallback anchor for the empty-log case
  pub fn aggregate_at(&self, log: &WorkoutLog, today: NaiveDate) -> WeeklyMetrics {
    let anchor = log.latest_date().unwrap_or(today);
    let window = WeekWindow::containing(anchor);
    let week = Self::summarize_week(log, &window);

    tracing::debug!(
      week_start = %window.start,
      week_end = %window.end,
      workouts = week.workout_count,
      total_minutes = week.total_minutes,
      mode = %self.mode,
      "aggregated weekly metrics"
    );

    let (steps, calories) = match self.mode {
      SeriesMode::Derived => (
        self.series_from_minutes(&week.daily_minutes, Metric::Steps),
        self.series_from_minutes(&week.daily_minutes, Metric::Calories),
      ),
      SeriesMode::Illustrative => (
        WeeklySeries(ILLUSTRATIVE_STEPS),
        WeeklySeries(ILLUSTRATIVE_CALORIES),
      ),
    };

    WeeklyMetrics {
      mode: self.mode,
      week,
      steps,
      calories,
    }
  }

  fn summarize_week(log: &WorkoutLog, window: &WeekWindow) -> WeekSummary {
    let mut daily_minutes = [0u64; 7];
    let mut minutes_by_activity = BTreeMap::new();
    let mut workout_count = 0;
    let mut excluded = 0;

    for entry in log {
      let Some(slot) = window.slot(entry.date) else {
        excluded += 1;
        continue;
      };
      let minutes = u64::from(entry.duration);
      daily_minutes[slot] = daily_minutes[slot].saturating_add(minutes);
      let by_activity = minutes_by_activity
        .entry(entry.activity.clone())
        .or_insert(0u64);
      *by_activity = by_activity.saturating_add(minutes);
      workout_count += 1;
    }

    if excluded > 0 {
      tracing::debug!(excluded, "entries outside the charted week");
    }

    let total_minutes = daily_minutes
      .iter()
      .fold(0u64, |acc, m| acc.saturating_add(*m));

    WeekSummary {
      week_start: window.start,
      week_end: window.end,
      total_minutes,
      workout_count,
      minutes_by_activity,
      daily_minutes,
    }
  }

  fn series_from_minutes(&self, daily_minutes: &[u64; 7], metric: Metric) -> WeeklySeries {
    let rate = self.rates.per_minute(metric);
    let mut points = [0.0; 7];
    for (point, minutes) in points.iter_mut().zip(daily_minutes) {
      if *minutes > 0 {
        *point = (*minutes as f64 * rate).round();
      }
    }
    WeeklySeries(points)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{date, log_of, mock_entry};

  fn derived() -> MetricsAggregator {
    MetricsAggregator::default()
  }

  #[test]
  fn test_week_window_starts_monday() {
    // 2025-07-02 is a Wednesday
    let window = WeekWindow::containing(date("2025-07-02"));
    assert_eq!(window.start, date("2025-06-30"));
    assert_eq!(window.end, date("2025-07-06"));

    // Sunday belongs to the week that started the Monday before
    let window = WeekWindow::containing(date("2025-07-06"));
    assert_eq!(window.start, date("2025-06-30"));
  }

  #[test]
  fn test_seeded_log_buckets_by_weekday() {
    // Arrange: Tue 30 min running, Wed 45 min cycling
    let log = log_of(&[("2025-07-01", "Running", 30), ("2025-07-02", "Cycling", 45)]);

    // Act
    let metrics = derived().aggregate_at(&log, date("2030-01-01"));

    // Assert: minutes 30 and 45 at 100 steps/min and 8 kcal/min
    assert_eq!(metrics.steps.0, [0.0, 3000.0, 4500.0, 0.0, 0.0, 0.0, 0.0]);
    assert_eq!(metrics.calories.0, [0.0, 240.0, 360.0, 0.0, 0.0, 0.0, 0.0]);
    assert_eq!(metrics.week.week_start, date("2025-06-30"));
    assert_eq!(metrics.week.total_minutes, 75);
    assert_eq!(metrics.week.workout_count, 2);
  }

  #[test]
  fn test_same_day_entries_are_summed() {
    let log = log_of(&[
      ("2025-07-05", "Running", 20),
      ("2025-07-05", "Yoga", 40),
      ("2025-07-05", "Running", 10),
    ]);

    let metrics = derived().aggregate_at(&log, date("2025-07-05"));

    assert_eq!(metrics.week.daily_minutes, [0, 0, 0, 0, 0, 70, 0]);
    assert_eq!(metrics.steps.get(5), Some(7000.0));
    assert_eq!(metrics.week.minutes_by_activity.get("Running"), Some(&30));
    assert_eq!(metrics.week.minutes_by_activity.get("Yoga"), Some(&40));
  }

  #[test]
  fn test_only_latest_week_is_charted() {
    // Arrange: one entry in the previous week, one in the latest
    let log = log_of(&[("2025-07-10", "Running", 30), ("2025-07-01", "Cycling", 45)]);

    // Act
    let metrics = derived().aggregate_at(&log, date("2025-07-01"));

    // Assert: window is anchored on 2025-07-10 (Thursday), July 1 is excluded
    assert_eq!(metrics.week.week_start, date("2025-07-07"));
    assert_eq!(metrics.week.workout_count, 1);
    assert_eq!(metrics.steps.0, [0.0, 0.0, 0.0, 3000.0, 0.0, 0.0, 0.0]);
  }

  #[test]
  fn test_empty_log_uses_today_and_zero_fills() {
    let metrics = derived().aggregate_at(&WorkoutLog::new(), date("2025-07-04"));

    assert_eq!(metrics.week.week_start, date("2025-06-30"));
    assert_eq!(metrics.steps, WeeklySeries::zeroed());
    assert_eq!(metrics.calories, WeeklySeries::zeroed());
    assert_eq!(metrics.week.workout_count, 0);
  }

  #[test]
  fn test_series_always_has_seven_points() {
    let log = log_of(&[("2025-07-06", "Hiking", 200)]);
    let metrics = derived().aggregate_at(&log, date("2025-07-06"));

    assert_eq!(metrics.steps.points().len(), 7);
    assert_eq!(metrics.calories.points().len(), 7);
    assert_eq!(metrics.steps_panel().labels.len(), 7);
    assert_eq!(metrics.steps.0[..6], [0.0; 6]);
  }

  #[test]
  fn test_aggregation_is_idempotent() {
    let log = WorkoutLog::seeded().append(mock_entry("2025-07-03", "Swimming", 20));
    let aggregator = derived();

    let first = aggregator.aggregate(&log);
    let second = aggregator.aggregate(&log);

    assert_eq!(first, second);
  }

  #[test]
  fn test_metrics_grow_with_duration() {
    let aggregator = derived();
    let mut previous = (0.0, 0.0);

    for minutes in [1u32, 2, 5, 30, 31, 120, 600] {
      let log = log_of(&[("2025-07-02", "Running", minutes)]);
      let metrics = aggregator.aggregate_at(&log, date("2025-07-02"));
      let current = (metrics.steps.0[2], metrics.calories.0[2]);
      assert!(current.0 >= previous.0 && current.1 >= previous.1);
      previous = current;
    }
  }

  #[test]
  fn test_custom_rates_are_applied() {
    let aggregator = MetricsAggregator::new(
      MetricRates {
        steps_per_minute: 150.0,
        calories_per_minute: 7.5,
      },
      SeriesMode::Derived,
    );
    let log = log_of(&[("2025-07-01", "Running", 3)]);

    let metrics = aggregator.aggregate_at(&log, date("2025-07-01"));

    assert_eq!(metrics.steps.0[1], 450.0);
    assert_eq!(metrics.calories.0[1], 23.0); // 22.5 rounds away from zero
  }

  #[test]
  fn test_illustrative_mode_ignores_log() {
    let aggregator = MetricsAggregator::new(MetricRates::default(), SeriesMode::Illustrative);

    let empty = aggregator.aggregate_at(&WorkoutLog::new(), date("2025-07-01"));
    let seeded = aggregator.aggregate_at(&WorkoutLog::seeded(), date("2025-07-01"));

    assert_eq!(empty.steps.0, ILLUSTRATIVE_STEPS);
    assert_eq!(empty.calories.0, ILLUSTRATIVE_CALORIES);
    assert_eq!(empty.steps, seeded.steps);
    assert_eq!(empty.calories, seeded.calories);
    // The week summary still reflects the log
    assert_eq!(seeded.week.workout_count, 2);
  }

  #[test]
  fn test_extreme_dates_do_not_panic() {
    let log = WorkoutLog::new()
      .append(crate::models::WorkoutEntry {
        date: NaiveDate::MAX,
        activity: "Running".to_string(),
        duration: u32::MAX,
      })
      .append(crate::models::WorkoutEntry {
        date: NaiveDate::MIN,
        activity: "Running".to_string(),
        duration: u32::MAX,
      });

    let metrics = derived().aggregate_at(&log, date("2025-07-01"));

    assert_eq!(metrics.week.week_end, NaiveDate::MAX);
    assert_eq!(metrics.week.workout_count, 1);
    assert_eq!(metrics.steps.points().len(), 7);
  }

  #[test]
  fn test_series_mode_parsing() {
    assert_eq!("derived".parse::<SeriesMode>(), Ok(SeriesMode::Derived));
    assert_eq!(" Illustrative ".parse::<SeriesMode>(), Ok(SeriesMode::Illustrative));
    assert!("static".parse::<SeriesMode>().is_err());
    assert_eq!(SeriesMode::Illustrative.to_string(), "illustrative");
  }
}
