//! Player dashboard pipeline: fetch games, project each metric, summarize.
//!
//! Runs on demand (a navigation event or a CLI command), never implicitly.

use serde::Serialize;
use tracing::{debug, warn};

use crate::api::{ApiError, StatsClient};
use crate::domain::{GameLog, PlayerProfile, Season};
use crate::stats::MetricSummaries;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerDashboard {
    pub player_id: u64,
    pub season: Season,
    /// `None` when the profile request failed; the charts do not need it.
    pub profile: Option<PlayerProfile>,
    pub games: Vec<GameLog>,
    pub summaries: MetricSummaries,
}

impl PlayerDashboard {
    /// Build from games already in hand.
    pub fn from_games(
        player_id: u64,
        season: Season,
        profile: Option<PlayerProfile>,
        games: Vec<GameLog>,
    ) -> Self {
        let summaries = MetricSummaries::from_games(&games);
        Self {
            player_id,
            season,
            profile,
            games,
            summaries,
        }
    }

    /// Fetch and summarize one player's season. A missing game log is an
    /// empty season; any other game-log failure is an error. A failed
    /// profile fetch only drops the profile.
    pub fn load(
        client: &StatsClient,
        player_id: u64,
        team_abbreviation: &str,
        season: Season,
    ) -> Result<Self, ApiError> {
        let games = match client.player_games(player_id, season, None) {
            Ok(games) => games,
            Err(ApiError::NotFound { .. }) => {
                debug!(player_id, %season, "no game log for season");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        let profile = match client.player_profile(player_id, team_abbreviation) {
            Ok(p) => Some(p),
            Err(e) => {
                warn!(player_id, error = %e, "profile unavailable for dashboard");
                None
            }
        };
        debug!(player_id, games = games.len(), %season, "summarizing dashboard");
        Ok(Self::from_games(player_id, season, profile, games))
    }

    pub fn title(&self) -> String {
        match &self.profile {
            Some(p) if !p.name.is_empty() => format!("{} · {}", p.name, self.season),
            _ => format!("Player {} · {}", self.player_id, self.season),
        }
    }

    pub fn has_games(&self) -> bool {
        !self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ScriptedTransport;
    use crate::config::ApiConfig;
    use serde_json::json;
    use std::sync::Arc;

    fn client(t: &Arc<ScriptedTransport>) -> StatsClient {
        let config = ApiConfig {
            max_retries: 0,
            ..ApiConfig::default()
        };
        StatsClient::new(t.clone(), &config)
    }

    #[test]
    fn loads_games_then_profile() {
        let t = Arc::new(ScriptedTransport::new());
        t.push_json(json!([
            {"points": 10, "rebounds": 5, "assists": 1},
            {"points": 20, "rebounds": 5, "assists": 3},
        ]))
        .push_json(json!({"name": "Mikal Bridges"}));

        let d = PlayerDashboard::load(&client(&t), 1, "NYK", Season::current()).unwrap();
        assert!(d.has_games());
        assert_eq!(d.summaries.points.mean, 15.0);
        assert_eq!(d.summaries.rebounds.mode.frequency, 2);
        assert_eq!(d.title(), "Mikal Bridges · 2024-25");
    }

    #[test]
    fn profile_failure_is_tolerated() {
        let t = Arc::new(ScriptedTransport::new());
        t.push_json(json!([])).push_status(404);
        let d = PlayerDashboard::load(&client(&t), 1, "NYK", Season::current()).unwrap();
        assert!(d.profile.is_none());
        assert!(d.summaries.is_empty());
        assert_eq!(d.title(), "Player 1 · 2024-25");
    }

    #[test]
    fn missing_game_log_is_an_empty_season() {
        let t = Arc::new(ScriptedTransport::new());
        t.push_status(404).push_json(json!({"name": "Mikal Bridges"}));
        let d = PlayerDashboard::load(&client(&t), 1, "NYK", Season::current()).unwrap();
        assert!(!d.has_games());
        assert!(d.summaries.is_empty());
        assert_eq!(d.title(), "Mikal Bridges · 2024-25");
    }

    #[test]
    fn games_failure_is_an_error() {
        let t = Arc::new(ScriptedTransport::new());
        t.push_status(500);
        assert!(PlayerDashboard::load(&client(&t), 1, "NYK", Season::current()).is_err());
    }
}
