//! Per-game box-score metrics the dashboard summarizes and projects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::player::GameLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Points,
    Rebounds,
    Assists,
}

impl Metric {
    /// Display order used by every chart.
    pub const ALL: [Metric; 3] = [Metric::Points, Metric::Rebounds, Metric::Assists];

    /// Field name the backend expects in model requests.
    pub fn wire_name(self) -> &'static str {
        match self {
            Metric::Points => "points",
            Metric::Rebounds => "rebounds",
            Metric::Assists => "assists",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Points => "Points",
            Metric::Rebounds => "Rebounds",
            Metric::Assists => "Assists",
        }
    }

    /// Read this metric off a game record.
    pub fn of(self, game: &GameLog) -> f64 {
        match self {
            Metric::Points => game.points,
            Metric::Rebounds => game.rebounds,
            Metric::Assists => game.assists,
        }
    }

    /// Project a game log down to this metric's observation sequence.
    pub fn project(self, games: &[GameLog]) -> Vec<f64> {
        games.iter().map(|g| self.of(g)).collect()
    }

    pub fn next(self) -> Metric {
        match self {
            Metric::Points => Metric::Rebounds,
            Metric::Rebounds => Metric::Assists,
            Metric::Assists => Metric::Points,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "points" | "pts" => Ok(Metric::Points),
            "rebounds" | "reb" => Ok(Metric::Rebounds),
            "assists" | "ast" => Ok(Metric::Assists),
            other => Err(format!(
                "unknown metric '{other}' (expected points, rebounds or assists)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(points: f64, rebounds: f64, assists: f64) -> GameLog {
        GameLog {
            points,
            rebounds,
            assists,
            ..GameLog::default()
        }
    }

    #[test]
    fn projects_each_metric() {
        let games = vec![game(30.0, 10.0, 5.0), game(22.0, 8.0, 11.0)];
        assert_eq!(Metric::Points.project(&games), vec![30.0, 22.0]);
        assert_eq!(Metric::Rebounds.project(&games), vec![10.0, 8.0]);
        assert_eq!(Metric::Assists.project(&games), vec![5.0, 11.0]);
    }

    #[test]
    fn parses_names_and_abbreviations() {
        assert_eq!("Points".parse::<Metric>(), Ok(Metric::Points));
        assert_eq!("reb".parse::<Metric>(), Ok(Metric::Rebounds));
        assert!("steals".parse::<Metric>().is_err());
    }

    #[test]
    fn serializes_as_wire_name() {
        for m in Metric::ALL {
            let json = serde_json::to_string(&m).unwrap();
            assert_eq!(json, format!("\"{}\"", m.wire_name()));
        }
    }

    #[test]
    fn next_cycles_through_all() {
        assert_eq!(Metric::Points.next().next().next(), Metric::Points);
    }
}
