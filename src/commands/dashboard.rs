//! Render-side queries

use crate::analysis::WeeklyMetrics;
use crate::models::{ChartPanel, Metric};
use crate::session::{Dashboard, Session};

pub fn get_dashboard(session: &Session) -> Dashboard {
  session.dashboard()
}

pub fn get_weekly_metrics(session: &Session) -> WeeklyMetrics {
  session.metrics()
}

/// Single chart panel for `metric`
pub fn get_chart(session: &Session, metric: Metric) -> ChartPanel {
  let metrics = session.metrics();
  ChartPanel::new(metric, metrics.series(metric))
}
