pub mod series;
pub mod workout;

pub use series::{ChartPanel, Metric, WeeklySeries, WEEKDAY_LABELS};
pub use workout::{DraftEntry, DraftField, WorkoutEntry};
