//! Courtside Core: records, statistics and the backend client for the NBA
//! stats dashboard.
//!
//! - Typed domain records decoded leniently from the backend's JSON
//! - Descriptive statistics (mean, median, mode, quartiles, Tukey outliers)
//!   that drive the dashboard charts
//! - A blocking HTTP client with retries and a circuit breaker
//! - Configuration loading and the player dashboard pipeline

pub mod api;
pub mod config;
pub mod domain;
pub mod pipeline;
pub mod stats;

pub use api::{ApiError, StatsClient};
pub use config::{ApiConfig, Config, ConfigError};
pub use domain::{Metric, Season};
pub use pipeline::PlayerDashboard;
pub use stats::{summarize, MetricSummaries, StatSummary};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything the TUI worker hands back across its
    /// channel is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<StatsClient>();
        require_sync::<StatsClient>();
        require_send::<ApiError>();
        require_sync::<ApiError>();
        require_send::<PlayerDashboard>();
        require_sync::<PlayerDashboard>();
        require_send::<StatSummary>();
        require_sync::<StatSummary>();
        require_send::<domain::Standings>();
        require_send::<domain::TeamReport>();
        require_send::<domain::OpponentSplit>();
        require_send::<domain::Prediction>();
        require_send::<Config>();
    }
}
