//! Client-side descriptive statistics for chart displays.

pub mod charts;
pub mod summary;

pub use charts::{BoxPlotRow, ComparisonBar, MetricSummaries};
pub use summary::{summarize, Mode, StatSummary, FENCE_MULTIPLIER};
