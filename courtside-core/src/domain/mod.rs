//! Typed records for everything the backend returns.

pub mod metric;
pub mod player;
pub mod prediction;
pub mod season;
pub mod table;
pub mod team;
pub mod wire;

pub use metric::Metric;
pub use player::{
    fmt_num, BackendMode, BackendSummary, CareerStats, GameLog, GeneralStats, OpponentSplit,
    PlayerProfile,
};
pub use prediction::{
    ConfusionMatrix, GamlssModel, GamlssRequest, GamlssResult, GumbelRequest, GumbelResult,
    LinearProbabilities, LinearRegressionRequest, LinearRegressionResult,
    LogisticRegressionRequest, LogisticRegressionResult, ModelBody, ModelKind, Prediction,
    RocCurve,
};
pub use season::{Season, SeasonParseError};
pub use table::{humanize_key, RecordTable, StatTable};
pub use team::{RosterEntry, Standings, TeamRef, TeamReport, TeamReportKind, TeamStanding};
