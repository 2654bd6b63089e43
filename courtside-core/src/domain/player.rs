//! Player profiles, game logs, and backend-computed player statistics.

use serde::{Deserialize, Serialize};

use super::table::StatTable;
use super::wire;

/// Biographical profile returned by the player-stats endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "wire::opt_string")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_string")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_string")]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_f64")]
    pub age: Option<f64>,
    #[serde(default, deserialize_with = "wire::opt_string")]
    pub experience: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_string")]
    pub college: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_string")]
    pub salary: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub team_id: Option<u64>,
}

impl PlayerProfile {
    /// Labelled rows for the info view.
    pub fn info_rows(&self) -> Vec<(&'static str, String)> {
        let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());
        vec![
            ("Position", or_na(&self.position)),
            ("Height", or_na(&self.height)),
            ("Weight", or_na(&self.weight)),
            (
                "Age",
                self.age
                    .map(|a| format!("{a:.0} years"))
                    .unwrap_or_else(|| "N/A".to_string()),
            ),
            (
                "Experience",
                self.experience
                    .as_ref()
                    .map(|e| format!("{e} years"))
                    .unwrap_or_else(|| "N/A".to_string()),
            ),
            (
                "College",
                self.college.clone().unwrap_or_else(|| "Not informed".to_string()),
            ),
            ("Salary", or_na(&self.salary)),
        ]
    }
}

/// One game in a player's log.
///
/// Metric fields default to zero when the backend omits them or sends
/// `null`, so every record projects to a complete observation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameLog {
    #[serde(default, deserialize_with = "wire::opt_string")]
    pub game_date: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_string")]
    pub opponent: Option<String>,
    #[serde(default, deserialize_with = "wire::f64_or_zero")]
    pub points: f64,
    #[serde(default, deserialize_with = "wire::f64_or_zero")]
    pub assists: f64,
    #[serde(default, deserialize_with = "wire::f64_or_zero")]
    pub rebounds: f64,
    #[serde(default, deserialize_with = "wire::opt_string")]
    pub home_away: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_string")]
    pub score: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_string")]
    pub result: Option<String>,
}

impl GameLog {
    /// `dd/mm/yyyy` when the date starts with an ISO `yyyy-mm-dd`, the raw
    /// string otherwise, `N/A` when absent.
    pub fn display_date(&self) -> String {
        let Some(raw) = self.game_date.as_deref() else {
            return "N/A".to_string();
        };
        raw.get(..10)
            .and_then(|prefix| chrono::NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| raw.to_string())
    }

    /// Cells for the games table: date, opponent, points, assists, rebounds,
    /// venue, score, result.
    pub fn table_row(&self) -> Vec<String> {
        let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());
        vec![
            self.display_date(),
            or_na(&self.opponent),
            format!("{:.0}", self.points),
            format!("{:.0}", self.assists),
            format!("{:.0}", self.rebounds),
            or_na(&self.home_away),
            or_na(&self.score),
            or_na(&self.result),
        ]
    }

    pub const TABLE_COLUMNS: [&'static str; 8] = [
        "Date", "Opponent", "Points", "Assists", "Rebounds", "Game", "Score", "Result",
    ];
}

/// Mode as reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendMode {
    #[serde(rename = "valor", default, deserialize_with = "wire::opt_f64")]
    pub value: Option<f64>,
    #[serde(rename = "frequencia", default, deserialize_with = "wire::opt_f64")]
    pub frequency: Option<f64>,
}

/// Backend-computed summary for one stat in an opponent split.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendSummary {
    #[serde(rename = "media", default, deserialize_with = "wire::opt_f64")]
    pub mean: Option<f64>,
    #[serde(rename = "mediana", default, deserialize_with = "wire::opt_f64")]
    pub median: Option<f64>,
    #[serde(rename = "moda", default)]
    pub mode: Option<BackendMode>,
    #[serde(rename = "desvio_padrao", default, deserialize_with = "wire::opt_f64")]
    pub std_dev: Option<f64>,
    #[serde(rename = "abaixo_media_percentual", default, deserialize_with = "wire::opt_f64")]
    pub below_mean_pct: Option<f64>,
    #[serde(rename = "abaixo_mediana_percentual", default, deserialize_with = "wire::opt_f64")]
    pub below_median_pct: Option<f64>,
}

/// Backend summaries keyed by stat, for the opponent-split table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralStats {
    #[serde(rename = "pontos", default)]
    pub points: Option<BackendSummary>,
    #[serde(rename = "rebotes", default)]
    pub rebounds: Option<BackendSummary>,
    #[serde(rename = "assistencias", default)]
    pub assists: Option<BackendSummary>,
    #[serde(rename = "aproveitamento_3pts", default)]
    pub three_point_pct: Option<BackendSummary>,
    #[serde(rename = "tempo_medio_jogado", default)]
    pub minutes: Option<BackendSummary>,
}

impl GeneralStats {
    pub const TABLE_COLUMNS: [&'static str; 8] = [
        "Statistic",
        "Mean",
        "Median",
        "Mode",
        "Mode Freq.",
        "Std Dev",
        "Below Mean",
        "Below Median",
    ];

    /// One row per stat, `N/A` for anything missing, percentages default to 0%.
    pub fn table_rows(&self) -> Vec<Vec<String>> {
        let entries: [(&str, &Option<BackendSummary>); 5] = [
            ("Points", &self.points),
            ("Rebounds", &self.rebounds),
            ("Assists", &self.assists),
            ("3PT %", &self.three_point_pct),
            ("Minutes", &self.minutes),
        ];
        let num = |v: Option<f64>| v.map(fmt_num).unwrap_or_else(|| "N/A".to_string());

        entries
            .iter()
            .map(|(label, summary)| {
                let s = summary.as_ref().cloned().unwrap_or_default();
                let mode = s.mode.unwrap_or_default();
                vec![
                    label.to_string(),
                    num(s.mean),
                    num(s.median),
                    num(mode.value),
                    num(mode.frequency),
                    num(s.std_dev),
                    format!("{}%", fmt_num(s.below_mean_pct.unwrap_or(0.0))),
                    format!("{}%", fmt_num(s.below_median_pct.unwrap_or(0.0))),
                ]
            })
            .collect()
    }
}

/// Games against one opponent plus the backend's summary of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpponentSplit {
    #[serde(rename = "jogos", default)]
    pub games: Vec<GameLog>,
    #[serde(rename = "estatisticas_gerais", default)]
    pub general_stats: Option<GeneralStats>,
}

/// Career totals and averages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerStats {
    #[serde(rename = "total_jogos", default, deserialize_with = "wire::opt_f64")]
    pub games: Option<f64>,
    #[serde(rename = "total_pontos", default, deserialize_with = "wire::opt_f64")]
    pub points: Option<f64>,
    #[serde(rename = "total_assistencias", default, deserialize_with = "wire::opt_f64")]
    pub assists: Option<f64>,
    #[serde(rename = "total_rebotes", default, deserialize_with = "wire::opt_f64")]
    pub rebounds: Option<f64>,
    #[serde(rename = "total_minutos", default, deserialize_with = "wire::opt_f64")]
    pub minutes: Option<f64>,
    #[serde(rename = "media_pontos", default, deserialize_with = "wire::opt_f64")]
    pub points_avg: Option<f64>,
    #[serde(rename = "media_assistencias", default, deserialize_with = "wire::opt_f64")]
    pub assists_avg: Option<f64>,
    #[serde(rename = "media_rebotes", default, deserialize_with = "wire::opt_f64")]
    pub rebounds_avg: Option<f64>,
}

impl CareerStats {
    pub fn table(&self) -> StatTable {
        let mut table = StatTable::default();
        let rows = [
            ("Total Games", self.games),
            ("Total Points", self.points),
            ("Total Assists", self.assists),
            ("Total Rebounds", self.rebounds),
            ("Total Minutes", self.minutes),
            ("Points Avg", self.points_avg),
            ("Assists Avg", self.assists_avg),
            ("Rebounds Avg", self.rebounds_avg),
        ];
        for (label, value) in rows {
            table.push(label, value.map(fmt_num).unwrap_or_else(|| "N/A".to_string()));
        }
        table
    }
}

/// Integers without decimals, everything else to two places.
pub fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn game_log_defaults_missing_metrics() {
        let game: GameLog = serde_json::from_value(json!({
            "game_date": "2024-11-02T00:00:00",
            "opponent": "BOS",
            "points": 31,
            "assists": null
        }))
        .unwrap();
        assert_eq!(game.points, 31.0);
        assert_eq!(game.assists, 0.0);
        assert_eq!(game.rebounds, 0.0);
        assert_eq!(game.display_date(), "02/11/2024");
        assert_eq!(game.table_row()[6], "N/A");
    }

    #[test]
    fn non_finite_points_never_reach_the_summary() {
        let games: Vec<GameLog> = serde_json::from_value(json!([
            {"points": 10}, {"points": "NaN"}, {"points": 20}
        ]))
        .unwrap();
        assert_eq!(games[1].points, 0.0);

        let points = &crate::stats::MetricSummaries::from_games(&games).points;
        assert_eq!(points.max, 20.0);
        assert!(points.min <= points.q1 && points.q3 <= points.max);
        assert!(points.mean.is_finite());
    }

    #[test]
    fn display_date_falls_back_to_raw() {
        let game = GameLog {
            game_date: Some("Nov 2".into()),
            ..GameLog::default()
        };
        assert_eq!(game.display_date(), "Nov 2");
        assert_eq!(GameLog::default().display_date(), "N/A");
    }

    #[test]
    fn profile_rows_fill_gaps() {
        let profile: PlayerProfile = serde_json::from_value(json!({
            "name": "Jalen Brunson",
            "position": "G",
            "height": "6-2",
            "weight": 190,
            "age": 28,
            "experience": 6,
            "college": null,
            "salary": "$24,960,001",
            "team_id": 1610612752
        }))
        .unwrap();
        assert_eq!(profile.team_id, Some(1_610_612_752));
        let rows = profile.info_rows();
        assert_eq!(rows[2], ("Weight", "190".to_string()));
        assert_eq!(rows[3], ("Age", "28 years".to_string()));
        assert_eq!(rows[5], ("College", "Not informed".to_string()));
    }

    #[test]
    fn opponent_split_decodes_general_stats() {
        let split: OpponentSplit = serde_json::from_value(json!({
            "jogos": [{"points": 20, "rebounds": 4, "assists": 7}],
            "estatisticas_gerais": {
                "pontos": {
                    "media": 24.5, "mediana": 24, "moda": {"valor": 22, "frequencia": 3},
                    "desvio_padrao": 4.1, "abaixo_media_percentual": 45.0
                }
            }
        }))
        .unwrap();
        assert_eq!(split.games.len(), 1);
        let rows = split.general_stats.unwrap().table_rows();
        assert_eq!(rows[0][1], "24.50");
        assert_eq!(rows[0][3], "22");
        assert_eq!(rows[0][6], "45%");
        assert_eq!(rows[0][7], "0%");
        assert_eq!(rows[1][1], "N/A");
    }

    #[test]
    fn empty_opponent_split() {
        let split: OpponentSplit = serde_json::from_value(json!({})).unwrap();
        assert!(split.games.is_empty());
        assert!(split.general_stats.is_none());
    }

    #[test]
    fn career_table_marks_missing() {
        let career: CareerStats = serde_json::from_value(json!({
            "total_jogos": 410, "media_pontos": 19.87
        }))
        .unwrap();
        let table = career.table();
        assert_eq!(table.rows[0], ("Total Games".to_string(), "410".to_string()));
        assert_eq!(table.rows[1].1, "N/A");
        assert_eq!(table.rows[5].1, "19.87");
    }
}
