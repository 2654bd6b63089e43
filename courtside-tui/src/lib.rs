//! Courtside TUI - terminal dashboard for NBA team and player statistics
//!
//! Views:
//! - Conference standings and team reports
//! - Rosters and player profiles with game logs filtered by opponent
//! - Season and career stats
//! - Model projections (Gumbel, linear, logistic, GAMLSS)
//! - A per-season dashboard of summary charts and box plots

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use input::handle_key;
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
