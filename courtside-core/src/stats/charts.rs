//! Chart-ready rows derived from per-metric summaries.

use serde::Serialize;

use super::summary::{summarize, StatSummary};
use crate::domain::{GameLog, Metric};

/// One bar of the Mean / Median / Mode comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonBar {
    pub label: &'static str,
    pub value: f64,
}

/// Five-number summary plus outliers for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotRow {
    pub metric: Metric,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub outliers: Vec<f64>,
}

impl StatSummary {
    /// Mean, median, and mode as bars, in that order.
    pub fn comparison_bars(&self) -> [ComparisonBar; 3] {
        [
            ComparisonBar {
                label: "Mean",
                value: self.mean,
            },
            ComparisonBar {
                label: "Median",
                value: self.median,
            },
            ComparisonBar {
                label: "Mode",
                value: self.mode.value,
            },
        ]
    }

    pub fn box_plot_row(&self, metric: Metric) -> BoxPlotRow {
        BoxPlotRow {
            metric,
            min: self.min,
            q1: self.q1,
            median: self.median,
            q3: self.q3,
            max: self.max,
            outliers: self.outliers.clone(),
        }
    }
}

/// One independently computed summary per metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricSummaries {
    pub points: StatSummary,
    pub rebounds: StatSummary,
    pub assists: StatSummary,
    /// Number of games summarized.
    pub games: usize,
}

impl MetricSummaries {
    pub fn from_games(games: &[GameLog]) -> Self {
        Self {
            points: summarize(&Metric::Points.project(games)),
            rebounds: summarize(&Metric::Rebounds.project(games)),
            assists: summarize(&Metric::Assists.project(games)),
            games: games.len(),
        }
    }

    pub fn get(&self, metric: Metric) -> &StatSummary {
        match metric {
            Metric::Points => &self.points,
            Metric::Rebounds => &self.rebounds,
            Metric::Assists => &self.assists,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.games == 0
    }

    /// Box-plot rows in display order.
    pub fn box_plot_rows(&self) -> Vec<BoxPlotRow> {
        Metric::ALL
            .iter()
            .map(|&m| self.get(m).box_plot_row(m))
            .collect()
    }

    /// Largest value any box plot needs to show, for a shared axis.
    pub fn axis_max(&self) -> f64 {
        Metric::ALL
            .iter()
            .map(|&m| self.get(m).max)
            .fold(0.0, f64::max)
    }
}
