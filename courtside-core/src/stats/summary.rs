//! Descriptive summary of a single metric's per-game observations.
//!
//! Quartiles use nearest-rank indexing into the ascending sequence
//! (`sorted[floor(n * 0.25)]`, `sorted[floor(n * 0.75)]`), not interpolation,
//! and outliers are flagged with Tukey fences at 1.5 × IQR.

use serde::{Deserialize, Serialize};

/// Tukey fence multiplier.
pub const FENCE_MULTIPLIER: f64 = 1.5;

/// Most frequent observation and how often it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Mode {
    pub value: f64,
    pub frequency: usize,
}

/// Summary of one observation set.
///
/// An empty observation set yields [`StatSummary::default()`]: every field is
/// zero and `outliers` is empty, so callers can render an empty chart without
/// an error branch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatSummary {
    pub mean: f64,
    pub median: f64,
    pub mode: Mode,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    /// Observations outside the fences, ascending.
    pub outliers: Vec<f64>,
}

impl StatSummary {
    /// Interquartile range, `q3 - q1`.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Lower and upper outlier fences.
    pub fn fences(&self) -> (f64, f64) {
        let spread = FENCE_MULTIPLIER * self.iqr();
        (self.q1 - spread, self.q3 + spread)
    }

    /// True when this is the empty-input sentinel.
    pub fn is_empty(&self) -> bool {
        self.mode.frequency == 0
    }
}

/// Summarize a sequence of observations.
///
/// Deterministic for a given multiset of values: the input is sorted before
/// anything order-dependent (including the sum) is computed. Never fails.
///
/// ```
/// use courtside_core::stats::summarize;
///
/// let s = summarize(&[1.0, 2.0, 2.0, 3.0, 100.0]);
/// assert_eq!(s.median, 2.0);
/// assert_eq!(s.mode.value, 2.0);
/// assert_eq!(s.outliers, vec![100.0]);
/// ```
pub fn summarize(observations: &[f64]) -> StatSummary {
    if observations.is_empty() {
        return StatSummary::default();
    }

    let mut sorted = observations.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();

    let mean = sorted.iter().sum::<f64>() / n as f64;

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    let mode = mode_of_sorted(&sorted);

    // floor(n * 0.25) and floor(n * 0.75) without going through floats.
    let q1 = sorted[n / 4];
    let q3 = sorted[n * 3 / 4];

    let spread = FENCE_MULTIPLIER * (q3 - q1);
    let (lower, upper) = (q1 - spread, q3 + spread);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|&v| v < lower || v > upper)
        .collect();

    StatSummary {
        mean,
        median,
        mode,
        min: sorted[0],
        max: sorted[n - 1],
        q1,
        q3,
        outliers,
    }
}

/// Mode of an ascending, non-empty slice.
///
/// Runs are visited in ascending order and only a strictly larger count
/// replaces the current best, so the smallest value wins a tie.
fn mode_of_sorted(sorted: &[f64]) -> Mode {
    let mut best = Mode::default();
    let mut i = 0;
    while i < sorted.len() {
        let value = sorted[i];
        let mut run = 1;
        while i + run < sorted.len() && sorted[i + run] == value {
            run += 1;
        }
        if run > best.frequency {
            best = Mode {
                value,
                frequency: run,
            };
        }
        i += run;
    }
    best
}
