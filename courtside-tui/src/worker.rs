//! Background worker thread: every backend call runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Each
//! command carries the navigation generation it was issued under; the
//! response echoes it so the main thread can drop results for a view the
//! user has already left.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use courtside_core::api::{ApiError, ModelRequest, StatsClient};
use courtside_core::domain::{
    CareerStats, GameLog, OpponentSplit, PlayerProfile, Prediction, RosterEntry, Season,
    StatTable, Standings, TeamReport, TeamReportKind,
};
use courtside_core::pipeline::PlayerDashboard;

/// Commands sent from the TUI to the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerCommand {
    LoadStandings {
        season: Season,
    },
    LoadRoster {
        team_id: u64,
        season: Season,
    },
    LoadTeamReport {
        kind: TeamReportKind,
        team_id: u64,
        season: Season,
    },
    LoadProfile {
        player_id: u64,
        team_abbr: String,
    },
    LoadPlayerGames {
        player_id: u64,
        season: Season,
        team_id: Option<u64>,
    },
    LoadOpponentSplit {
        player_id: u64,
        season: Season,
        opponent_id: u64,
    },
    LoadSeasonStats {
        player_id: u64,
        season: Season,
    },
    LoadCareer {
        player_id: u64,
    },
    LoadDashboard {
        player_id: u64,
        team_abbr: String,
        season: Season,
    },
    Predict {
        player_id: u64,
        team_id: u64,
        request: ModelRequest,
    },
    Shutdown,
}

/// What came back, paired with the generation it was requested under.
#[derive(Debug)]
pub struct WorkerResponse {
    pub generation: u64,
    pub payload: Payload,
}

#[derive(Debug)]
pub enum Payload {
    Standings(Season, Result<Standings, ApiError>),
    Roster(u64, Result<Vec<RosterEntry>, ApiError>),
    TeamReport(TeamReportKind, Result<TeamReport, ApiError>),
    Profile(Result<PlayerProfile, ApiError>),
    PlayerGames(Result<Vec<GameLog>, ApiError>),
    OpponentSplit(u64, Result<OpponentSplit, ApiError>),
    SeasonStats(Season, Result<StatTable, ApiError>),
    Career(Result<CareerStats, ApiError>),
    Dashboard(Result<PlayerDashboard, ApiError>),
    Prediction(Result<Prediction, ApiError>),
}

impl Payload {
    /// Short description of the request, for the error history.
    pub fn context(&self) -> &'static str {
        match self {
            Payload::Standings(..) => "standings",
            Payload::Roster(..) => "team roster",
            Payload::TeamReport(..) => "team report",
            Payload::Profile(..) => "player profile",
            Payload::PlayerGames(..) => "player games",
            Payload::OpponentSplit(..) => "games vs opponent",
            Payload::SeasonStats(..) => "season stats",
            Payload::Career(..) => "career stats",
            Payload::Dashboard(..) => "player dashboard",
            Payload::Prediction(..) => "model prediction",
        }
    }
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    client: StatsClient,
    rx: Receiver<(u64, WorkerCommand)>,
    tx: Sender<WorkerResponse>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("courtside-worker".into())
        .spawn(move || worker_loop(client, rx, tx))
}

fn worker_loop(
    client: StatsClient,
    rx: Receiver<(u64, WorkerCommand)>,
    tx: Sender<WorkerResponse>,
) {
    info!(backend = client.base_url(), "worker started");
    loop {
        match rx.recv() {
            Ok((_, WorkerCommand::Shutdown)) | Err(_) => break,
            Ok((generation, cmd)) => {
                debug!(generation, ?cmd, "worker command");
                let payload = execute(&client, cmd);
                if tx.send(WorkerResponse { generation, payload }).is_err() {
                    break;
                }
            }
        }
    }
    info!("worker stopped");
}

/// Run one command against the client. `Shutdown` never reaches here.
pub fn execute(client: &StatsClient, cmd: WorkerCommand) -> Payload {
    match cmd {
        WorkerCommand::LoadStandings { season } => {
            Payload::Standings(season, client.standings(season))
        }
        WorkerCommand::LoadRoster { team_id, season } => {
            Payload::Roster(team_id, client.players(team_id, season))
        }
        WorkerCommand::LoadTeamReport {
            kind,
            team_id,
            season,
        } => Payload::TeamReport(kind, client.team_report(kind, team_id, season)),
        WorkerCommand::LoadProfile {
            player_id,
            team_abbr,
        } => Payload::Profile(client.player_profile(player_id, &team_abbr)),
        WorkerCommand::LoadPlayerGames {
            player_id,
            season,
            team_id,
        } => Payload::PlayerGames(client.player_games(player_id, season, team_id)),
        WorkerCommand::LoadOpponentSplit {
            player_id,
            season,
            opponent_id,
        } => Payload::OpponentSplit(
            opponent_id,
            client.player_games_vs(player_id, season, opponent_id),
        ),
        WorkerCommand::LoadSeasonStats { player_id, season } => {
            Payload::SeasonStats(season, client.player_season_stats(player_id, season))
        }
        WorkerCommand::LoadCareer { player_id } => {
            Payload::Career(client.player_career_stats(player_id))
        }
        WorkerCommand::LoadDashboard {
            player_id,
            team_abbr,
            season,
        } => Payload::Dashboard(PlayerDashboard::load(client, player_id, &team_abbr, season)),
        WorkerCommand::Predict {
            player_id,
            team_id,
            request,
        } => Payload::Prediction(client.predict(player_id, team_id, &request)),
        WorkerCommand::Shutdown => Payload::Prediction(Err(ApiError::InvalidRequest(
            "shutdown is handled by the worker loop".into(),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_core::api::ScriptedTransport;
    use courtside_core::config::ApiConfig;
    use serde_json::json;
    use std::sync::mpsc;
    use std::sync::Arc;

    fn scripted_client() -> (Arc<ScriptedTransport>, StatsClient) {
        let t = Arc::new(ScriptedTransport::new());
        let config = ApiConfig {
            max_retries: 0,
            ..ApiConfig::default()
        };
        let client = StatsClient::new(t.clone(), &config);
        (t, client)
    }

    #[test]
    fn worker_echoes_generation() {
        let (t, client) = scripted_client();
        t.push_json(json!({"Eastern Conference": [], "Western Conference": []}));

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(client, cmd_rx, resp_tx).unwrap();

        cmd_tx
            .send((7, WorkerCommand::LoadStandings { season: Season::current() }))
            .unwrap();
        let resp = resp_rx.recv().unwrap();
        assert_eq!(resp.generation, 7);
        assert!(matches!(resp.payload, Payload::Standings(_, Ok(_))));

        cmd_tx.send((8, WorkerCommand::Shutdown)).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn errors_come_back_as_payloads() {
        let (t, client) = scripted_client();
        t.push_status(404);
        let payload = execute(&client, WorkerCommand::LoadCareer { player_id: 1 });
        assert_eq!(payload.context(), "career stats");
        assert!(matches!(payload, Payload::Career(Err(ApiError::NotFound { .. }))));
    }
}
