use serde::{Deserialize, Serialize};

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Seven points, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySeries(pub [f64; 7]);

impl WeeklySeries {
  pub fn zeroed() -> Self {
    Self([0.0; 7])
  }

  pub fn points(&self) -> &[f64; 7] {
    &self.0
  }

  /// Value for a weekday slot (0 = Monday)
  pub fn get(&self, slot: usize) -> Option<f64> {
    self.0.get(slot).copied()
  }

  pub fn total(&self) -> f64 {
    self.0.iter().sum()
  }
}

impl From<[f64; 7]> for WeeklySeries {
  fn from(points: [f64; 7]) -> Self {
    Self(points)
  }
}

/// Which metric a series carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
  Steps,
  Calories,
}

impl Metric {
  pub fn title(&self) -> &'static str {
    match self {
      Metric::Steps => "Weekly Steps",
      Metric::Calories => "Calories Burned",
    }
  }

  pub fn dataset_label(&self) -> &'static str {
    match self {
      Metric::Steps => "Steps",
      Metric::Calories => "Calories Burned",
    }
  }
}

/// A series ready for a chart: title, dataset label and the weekday axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPanel {
  pub metric: Metric,
  pub title: String,
  pub label: String,
  pub labels: Vec<String>,
  pub data: WeeklySeries,
}

impl ChartPanel {
  pub fn new(metric: Metric, data: WeeklySeries) -> Self {
    Self {
      metric,
      title: metric.title().to_string(),
      label: metric.dataset_label().to_string(),
      labels: WEEKDAY_LABELS.iter().map(|l| l.to_string()).collect(),
      data,
    }
  }
}
