//! Standings, rosters, and team reports.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::table::{RecordTable, StatTable};
use super::wire;

/// One row of a conference standings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    #[serde(default, deserialize_with = "wire::f64_or_zero")]
    pub rank: f64,
    pub team: String,
    #[serde(rename = "teamId", deserialize_with = "wire::id")]
    pub team_id: u64,
    #[serde(default, deserialize_with = "wire::f64_or_zero")]
    pub wins: f64,
    #[serde(default, deserialize_with = "wire::f64_or_zero")]
    pub losses: f64,
}

impl TeamStanding {
    /// Winning percentage in `[0, 1]`; zero before any games are played.
    pub fn win_pct(&self) -> f64 {
        let played = self.wins + self.losses;
        if played > 0.0 {
            self.wins / played
        } else {
            0.0
        }
    }
}

/// League standings split by conference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    #[serde(rename = "Eastern Conference", default)]
    pub eastern: Vec<TeamStanding>,
    #[serde(rename = "Western Conference", default)]
    pub western: Vec<TeamStanding>,
}

impl Standings {
    /// Every team, Eastern Conference first, for team pickers.
    pub fn all_teams(&self) -> Vec<TeamRef> {
        self.eastern
            .iter()
            .chain(&self.western)
            .map(|t| TeamRef {
                id: t.team_id,
                name: t.team.clone(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.eastern.is_empty() && self.western.is_empty()
    }

    pub fn team_name(&self, team_id: u64) -> Option<&str> {
        self.eastern
            .iter()
            .chain(&self.western)
            .find(|t| t.team_id == team_id)
            .map(|t| t.team.as_str())
    }
}

/// Minimal team reference for pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRef {
    pub id: u64,
    pub name: String,
}

/// One player on a team roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(deserialize_with = "wire::id")]
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "wire::opt_f64")]
    pub age: Option<f64>,
    /// Team abbreviation, e.g. `NYK`.
    #[serde(default, deserialize_with = "wire::opt_string")]
    pub team: Option<String>,
}

/// Which team report to request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamReportKind {
    #[default]
    Victories,
    GeneralStats,
    DefensiveStats,
    Games,
}

impl TeamReportKind {
    pub const ALL: [TeamReportKind; 4] = [
        TeamReportKind::Victories,
        TeamReportKind::GeneralStats,
        TeamReportKind::DefensiveStats,
        TeamReportKind::Games,
    ];

    /// Backend path prefix (the team id is appended).
    pub fn path_prefix(self) -> &'static str {
        match self {
            TeamReportKind::Victories => "/team-victories",
            TeamReportKind::GeneralStats => "/team-stats",
            TeamReportKind::DefensiveStats => "/defensive-stats",
            TeamReportKind::Games => "/team-games",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TeamReportKind::Victories => "Victories",
            TeamReportKind::GeneralStats => "General Stats",
            TeamReportKind::DefensiveStats => "Defensive Stats",
            TeamReportKind::Games => "Games",
        }
    }
}

impl fmt::Display for TeamReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TeamReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "victories" | "wins" => Ok(TeamReportKind::Victories),
            "stats" | "general" | "general-stats" => Ok(TeamReportKind::GeneralStats),
            "defense" | "defensive" | "defensive-stats" => Ok(TeamReportKind::DefensiveStats),
            "games" => Ok(TeamReportKind::Games),
            other => Err(format!(
                "unknown team report '{other}' (expected victories, stats, defense or games)"
            )),
        }
    }
}

/// A team report normalized from the backend's several response shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamReport {
    pub stats: StatTable,
    pub defensive_stats: StatTable,
    pub rows: RecordTable,
}

impl TeamReport {
    /// Normalize a raw team-report response.
    ///
    /// - `team_stats_data` → `stats`
    /// - `team_stats_data_div` / `defensive_stats_data` → `defensive_stats`
    ///   (the latter wins when both are present)
    /// - `games_data` → rows of date, opponent, result, venue, score
    /// - `victories_data` → rows as sent
    /// - an object with none of the above → a single row of the object
    /// - a bare array → rows as sent
    pub fn from_value(value: &Value) -> Self {
        let mut report = TeamReport::default();

        let obj = match value {
            Value::Object(obj) => obj,
            Value::Array(items) => {
                report.rows = RecordTable::from_objects(items);
                return report;
            }
            _ => return report,
        };

        if let Some(stats) = obj.get("team_stats_data") {
            report.stats = StatTable::from_value(stats);
        }
        if let Some(div) = obj.get("team_stats_data_div") {
            report.defensive_stats = StatTable::from_value(div);
        }
        if let Some(def) = obj.get("defensive_stats_data") {
            report.defensive_stats = StatTable::from_value(def);
        }

        if let Some(Value::Array(games)) = obj.get("games_data") {
            report.rows = games_table(games);
        }
        if let Some(Value::Array(victories)) = obj.get("victories_data") {
            report.rows = RecordTable::from_objects(victories);
        }

        if report.rows.is_empty() && report.stats.is_empty() && report.defensive_stats.is_empty()
        {
            report.rows = RecordTable::from_objects(std::slice::from_ref(value));
        }
        report
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty() && self.defensive_stats.is_empty() && self.rows.is_empty()
    }
}

fn games_table(games: &[Value]) -> RecordTable {
    let mut table = RecordTable::new(
        ["Date", "Opponent", "Result", "Venue", "Score"]
            .into_iter()
            .map(String::from)
            .collect(),
    );
    for game in games {
        let field = |key: &str| {
            game.get(key)
                .map(wire::display_value)
                .unwrap_or_else(|| "N/A".to_string())
        };
        let venue = match game.get("home_or_away").and_then(Value::as_str) {
            Some("home") => "Home",
            _ => "Away",
        };
        table.push_row(vec![
            field("date"),
            field("opponent"),
            field("result"),
            venue.to_string(),
            field("score"),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn standings_decode_conference_keys() {
        let standings: Standings = serde_json::from_value(json!({
            "Eastern Conference": [
                {"rank": 1, "team": "Boston Celtics", "teamId": 1610612738, "wins": 64, "losses": 18}
            ],
            "Western Conference": [
                {"rank": 1, "team": "Oklahoma City Thunder", "teamId": "1610612760", "wins": 57, "losses": null}
            ]
        }))
        .unwrap();
        assert_eq!(standings.eastern[0].team_id, 1_610_612_738);
        assert_eq!(standings.western[0].losses, 0.0);
        let teams = standings.all_teams();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].name, "Boston Celtics");
        assert_eq!(standings.team_name(1_610_612_760), Some("Oklahoma City Thunder"));
    }

    #[test]
    fn missing_conference_is_empty() {
        let standings: Standings = serde_json::from_value(json!({})).unwrap();
        assert!(standings.is_empty());
    }

    #[test]
    fn win_pct_handles_no_games() {
        let t = TeamStanding {
            rank: 1.0,
            team: "X".into(),
            team_id: 1,
            wins: 0.0,
            losses: 0.0,
        };
        assert_eq!(t.win_pct(), 0.0);
    }

    #[test]
    fn report_from_team_stats_shape() {
        let report = TeamReport::from_value(&json!({
            "team_stats_data": {"points_per_game": 112.4},
            "team_stats_data_div": {"opp_points": 108.1},
        }));
        assert_eq!(report.stats.rows[0].0, "points per game");
        assert_eq!(report.defensive_stats.rows[0].1, "108.10");
        assert!(report.rows.is_empty());
    }

    #[test]
    fn report_from_games_shape() {
        let report = TeamReport::from_value(&json!({
            "games_data": [
                {"date": "2024-10-22", "opponent": "BOS", "result": "L", "home_or_away": "away", "score": "109-132"},
                {"date": "2024-10-25", "opponent": "IND", "result": "W", "home_or_away": "home", "score": "123-98"}
            ]
        }));
        assert_eq!(report.rows.columns[3], "Venue");
        assert_eq!(report.rows.rows[0][3], "Away");
        assert_eq!(report.rows.rows[1][3], "Home");
    }

    #[test]
    fn report_from_unknown_object_is_single_row() {
        let report = TeamReport::from_value(&json!({"wins": 51, "losses": 31}));
        assert_eq!(report.rows.columns, vec!["wins", "losses"]);
        assert_eq!(report.rows.rows, vec![vec!["51".to_string(), "31".to_string()]]);
    }

    #[test]
    fn report_from_bare_array() {
        let report = TeamReport::from_value(&json!([{"game": 1}, {"game": 2}]));
        assert_eq!(report.rows.rows.len(), 2);
    }

    #[test]
    fn report_kind_parses_cli_names() {
        assert_eq!("defense".parse::<TeamReportKind>(), Ok(TeamReportKind::DefensiveStats));
        assert_eq!("stats".parse::<TeamReportKind>(), Ok(TeamReportKind::GeneralStats));
        assert!("roster".parse::<TeamReportKind>().is_err());
    }
}
