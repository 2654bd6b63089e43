//! Application state, owned by the main thread.
//!
//! All TUI state lives here. The worker thread communicates via channels;
//! every command is tagged with the current navigation generation and
//! responses from an older generation are dropped.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use courtside_core::api::{ApiError, ModelRequest};
use courtside_core::domain::{
    CareerStats, GameLog, GamlssModel, GamlssRequest, GumbelRequest, LinearRegressionRequest,
    LogisticRegressionRequest, Metric, ModelKind, OpponentSplit, PlayerProfile, Prediction,
    RosterEntry, Season, StatTable, Standings, TeamRef, TeamReport, TeamReportKind,
};
use courtside_core::pipeline::PlayerDashboard;

use crate::worker::{Payload, WorkerCommand, WorkerResponse};

const ERROR_HISTORY_CAP: usize = 50;

/// A screen on the navigation stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Standings,
    TeamFilter,
    Roster { team_id: u64, team_name: String },
    Player { player_id: u64, team_abbr: String },
    PlayerStats { player_id: u64, team_abbr: String },
    Dashboard { player_id: u64, team_abbr: String },
    Help,
}

impl Route {
    pub fn label(&self) -> &'static str {
        match self {
            Route::Standings => "Standings",
            Route::TeamFilter => "Team Reports",
            Route::Roster { .. } => "Roster",
            Route::Player { .. } => "Player",
            Route::PlayerStats { .. } => "Player Stats",
            Route::Dashboard { .. } => "Dashboard",
            Route::Help => "Help",
        }
    }
}

/// One backend-backed slot of a view.
///
/// `Idle` means "fetch me": the next activation sends the request and moves
/// the slot to `Loading`.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Idle
    }
}

impl<T> Loadable<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Loadable::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    /// `Idle` → `Loading`; true when the caller should send the request.
    fn begin(&mut self) -> bool {
        if self.is_idle() {
            *self = Loadable::Loading;
            true
        } else {
            false
        }
    }

    /// A request in flight under an older generation will never land.
    fn abandon(&mut self) {
        if self.is_loading() {
            *self = Loadable::Idle;
        }
    }

    /// Failed slots go back to `Idle` so the next activation retries them.
    fn retry(&mut self) {
        if matches!(self, Loadable::Failed(_)) {
            *self = Loadable::Idle;
        }
    }

    fn settle(&mut self, result: Result<T, ApiError>) {
        *self = match result {
            Ok(v) => Loadable::Ready(v),
            Err(e) => Loadable::Failed(e.to_string()),
        };
    }
}

/// Tabs of the player view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayerTab {
    #[default]
    Info,
    Games,
    Probability,
}

impl PlayerTab {
    pub const ALL: [PlayerTab; 3] = [PlayerTab::Info, PlayerTab::Games, PlayerTab::Probability];

    pub fn label(self) -> &'static str {
        match self {
            PlayerTab::Info => "Info",
            PlayerTab::Games => "Games",
            PlayerTab::Probability => "Probability",
        }
    }

    pub fn next(self) -> PlayerTab {
        match self {
            PlayerTab::Info => PlayerTab::Games,
            PlayerTab::Games => PlayerTab::Probability,
            PlayerTab::Probability => PlayerTab::Info,
        }
    }

    pub fn prev(self) -> PlayerTab {
        match self {
            PlayerTab::Info => PlayerTab::Probability,
            PlayerTab::Games => PlayerTab::Info,
            PlayerTab::Probability => PlayerTab::Games,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    Data,
    Input,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Backend => "API",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Input => "INPUT",
            ErrorCategory::Other => "ERR",
        }
    }

    pub fn of(err: &ApiError) -> Self {
        match err {
            ApiError::NetworkUnreachable(_) | ApiError::Timeout(_) | ApiError::CircuitOpen => {
                ErrorCategory::Network
            }
            ApiError::Status { .. } | ApiError::NotFound { .. } => ErrorCategory::Backend,
            ApiError::Decode { .. } => ErrorCategory::Data,
            ApiError::InvalidRequest(_) => ErrorCategory::Input,
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    ErrorHistory,
}

/// Next season in the picker order, wrapping.
pub fn cycle_season(season: Season) -> Season {
    let known = Season::known();
    match known.iter().position(|&s| s == season) {
        Some(i) => known[(i + 1) % known.len()],
        None => known[0],
    }
}

fn step(cursor: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = len as isize - 1;
    (cursor as isize + delta).clamp(0, max) as usize
}

// ── View states ──────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct StandingsView {
    pub season: Season,
    pub data: Loadable<Standings>,
    /// Flat index: Eastern Conference rows first, then Western.
    pub cursor: usize,
}

impl StandingsView {
    pub fn team_count(&self) -> usize {
        self.data
            .ready()
            .map(|s| s.eastern.len() + s.western.len())
            .unwrap_or(0)
    }

    pub fn selected(&self) -> Option<TeamRef> {
        self.data.ready()?.all_teams().into_iter().nth(self.cursor)
    }
}

#[derive(Debug, Default)]
pub struct TeamFilterView {
    pub season: Season,
    pub cursor: usize,
    pub kind: TeamReportKind,
    /// Team, report and season last asked for; `None` until the first Enter.
    pub query: Option<(TeamRef, TeamReportKind, Season)>,
    pub report: Loadable<TeamReport>,
    pub scroll: usize,
}

impl TeamFilterView {
    pub fn cycle_kind(&mut self, forward: bool) {
        let all = TeamReportKind::ALL;
        let i = all.iter().position(|&k| k == self.kind).unwrap_or(0);
        let n = all.len();
        self.kind = all[if forward { (i + 1) % n } else { (i + n - 1) % n }];
    }
}

#[derive(Debug, Default)]
pub struct RosterView {
    pub team_id: u64,
    pub team_name: String,
    pub season: Season,
    pub data: Loadable<Vec<RosterEntry>>,
    pub cursor: usize,
}

/// Inputs for the probability tab.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelForm {
    pub kind: ModelKind,
    pub metric: Metric,
    pub gamlss_model: GamlssModel,
    /// Raw text of `x` (Gumbel) or the limit (logistic).
    pub input: String,
}

impl Default for ModelForm {
    fn default() -> Self {
        Self {
            kind: ModelKind::Gumbel,
            metric: Metric::Points,
            gamlss_model: GamlssModel::default(),
            input: String::new(),
        }
    }
}

impl ModelForm {
    /// Label of the numeric input this model takes, if any.
    pub fn value_label(&self) -> Option<&'static str> {
        match self.kind {
            ModelKind::Gumbel => Some("x"),
            ModelKind::Logistic => Some("Limit"),
            ModelKind::Linear | ModelKind::Gamlss => None,
        }
    }

    /// Accepts digits, one decimal point and a leading minus sign.
    pub fn push_char(&mut self, c: char) -> bool {
        let ok = match c {
            '0'..='9' => true,
            '.' => !self.input.contains('.'),
            '-' => self.input.is_empty(),
            _ => false,
        };
        if ok {
            self.input.push(c);
        }
        ok
    }

    pub fn pop_char(&mut self) -> bool {
        self.input.pop().is_some()
    }

    pub fn request(&self) -> Result<ModelRequest, String> {
        let value = || {
            self.input
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| "Please enter a valid numeric value.".to_string())
        };
        Ok(match self.kind {
            ModelKind::Gumbel => ModelRequest::Gumbel(GumbelRequest {
                metric: self.metric,
                x: value()?,
            }),
            ModelKind::Linear => ModelRequest::Linear(LinearRegressionRequest {
                metric: self.metric,
            }),
            ModelKind::Logistic => ModelRequest::Logistic(LogisticRegressionRequest {
                metric: self.metric,
                threshold: value()?,
            }),
            ModelKind::Gamlss => ModelRequest::Gamlss(GamlssRequest {
                metric: self.metric,
                model: self.gamlss_model,
            }),
        })
    }
}

#[derive(Debug, Default)]
pub struct PlayerView {
    pub player_id: u64,
    pub team_abbr: String,
    pub season: Season,
    pub tab: PlayerTab,
    pub profile: Loadable<PlayerProfile>,
    pub games: Loadable<Vec<GameLog>>,
    /// Opponent picker position: 0 is "all opponents", `i` is `teams[i - 1]`.
    pub opponent_cursor: usize,
    /// The opponent filter currently applied.
    pub opponent: Option<TeamRef>,
    pub split: Loadable<OpponentSplit>,
    pub scroll: usize,
    pub form: ModelForm,
    pub pending_model: Option<(u64, ModelRequest)>,
    pub prediction: Loadable<Prediction>,
}

impl PlayerView {
    pub fn name(&self) -> Option<&str> {
        self.profile
            .ready()
            .map(|p| p.name.as_str())
            .filter(|n| !n.is_empty())
    }

    pub fn team_id(&self) -> Option<u64> {
        self.profile.ready().and_then(|p| p.team_id)
    }

    /// Games shown in the table: the split when a filter is applied.
    pub fn visible_games(&self) -> Option<&[GameLog]> {
        match &self.opponent {
            Some(_) => self.split.ready().map(|s| s.games.as_slice()),
            None => self.games.ready().map(Vec::as_slice),
        }
    }
}

#[derive(Debug, Default)]
pub struct PlayerStatsView {
    pub player_id: u64,
    pub team_abbr: String,
    pub season: Season,
    pub profile: Loadable<PlayerProfile>,
    pub season_stats: Loadable<StatTable>,
    pub career: Loadable<CareerStats>,
}

#[derive(Debug, Default)]
pub struct DashboardView {
    pub player_id: u64,
    pub team_abbr: String,
    pub season: Season,
    pub data: Loadable<PlayerDashboard>,
}

// ── Top-level state ──────────────────────────────────────────────────

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    stack: Vec<Route>,
    /// Bumped on every navigation; responses tagged older are stale.
    pub generation: u64,
    pub default_season: Season,

    // Views
    pub standings: StandingsView,
    pub team_filter: TeamFilterView,
    pub roster: RosterView,
    pub player: PlayerView,
    pub player_stats: PlayerStatsView,
    pub dashboard: DashboardView,
    pub help_scroll: usize,

    /// Team list for pickers, taken from the latest standings.
    pub teams: Loadable<Vec<TeamRef>>,

    // Worker communication
    pub worker_tx: Sender<(u64, WorkerCommand)>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub backend_url: String,
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<(u64, WorkerCommand)>,
        worker_rx: Receiver<WorkerResponse>,
        default_season: Season,
        backend_url: String,
    ) -> Self {
        Self {
            running: true,
            stack: vec![Route::Standings],
            generation: 0,
            default_season,
            standings: StandingsView {
                season: default_season,
                ..StandingsView::default()
            },
            team_filter: TeamFilterView {
                season: default_season,
                ..TeamFilterView::default()
            },
            roster: RosterView::default(),
            player: PlayerView::default(),
            player_stats: PlayerStatsView::default(),
            dashboard: DashboardView::default(),
            help_scroll: 0,
            teams: Loadable::Idle,
            worker_tx,
            worker_rx,
            backend_url,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::Welcome,
        }
    }

    pub fn route(&self) -> &Route {
        // The stack is never empty: `back` keeps the root.
        self.stack.last().unwrap_or(&Route::Standings)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Breadcrumb of route labels, root first.
    pub fn breadcrumb(&self) -> String {
        self.stack
            .iter()
            .map(Route::label)
            .collect::<Vec<_>>()
            .join(" › ")
    }

    // ── Navigation ────────────────────────────────────────────────────

    /// Push a route and load what it shows.
    pub fn navigate(&mut self, route: Route) {
        if self.route() == &route {
            return;
        }
        match &route {
            Route::Roster { team_id, team_name } => {
                self.roster = RosterView {
                    team_id: *team_id,
                    team_name: team_name.clone(),
                    season: self.default_season,
                    ..RosterView::default()
                };
            }
            Route::Player {
                player_id,
                team_abbr,
            } => {
                if self.player.player_id != *player_id || self.player.team_abbr != *team_abbr {
                    self.player = PlayerView {
                        player_id: *player_id,
                        team_abbr: team_abbr.clone(),
                        season: self.default_season,
                        ..PlayerView::default()
                    };
                }
            }
            Route::PlayerStats {
                player_id,
                team_abbr,
            } => {
                self.player_stats = PlayerStatsView {
                    player_id: *player_id,
                    team_abbr: team_abbr.clone(),
                    season: self.default_season,
                    ..PlayerStatsView::default()
                };
            }
            Route::Dashboard {
                player_id,
                team_abbr,
            } => {
                self.dashboard = DashboardView {
                    player_id: *player_id,
                    team_abbr: team_abbr.clone(),
                    season: self.player.season,
                    ..DashboardView::default()
                };
            }
            Route::Standings | Route::TeamFilter | Route::Help => {}
        }
        debug!(route = route.label(), "navigate");
        self.stack.push(route);
        self.refresh();
    }

    /// Pop one route; the root stays.
    pub fn back(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
            self.refresh();
        }
    }

    /// Clear the stack back to the standings.
    pub fn home(&mut self) {
        if self.stack.len() > 1 {
            self.stack.truncate(1);
            self.refresh();
        }
    }

    /// Start a new generation and (re)issue every fetch the current view needs.
    pub fn refresh(&mut self) {
        self.generation += 1;
        self.standings.data.abandon();
        self.team_filter.report.abandon();
        self.roster.data.abandon();
        self.player.profile.abandon();
        self.player.games.abandon();
        self.player.split.abandon();
        self.player.prediction.abandon();
        self.player_stats.profile.abandon();
        self.player_stats.season_stats.abandon();
        self.player_stats.career.abandon();
        self.dashboard.data.abandon();
        self.teams.abandon();
        self.activate();
    }

    /// Retry whatever failed in the current view.
    pub fn reload(&mut self) {
        match self.route().clone() {
            Route::Standings => self.standings.data.retry(),
            Route::TeamFilter => {
                self.teams.retry();
                self.team_filter.report.retry();
            }
            Route::Roster { .. } => self.roster.data.retry(),
            Route::Player { .. } => {
                self.teams.retry();
                self.player.profile.retry();
                self.player.games.retry();
                self.player.split.retry();
            }
            Route::PlayerStats { .. } => {
                self.player_stats.profile.retry();
                self.player_stats.season_stats.retry();
                self.player_stats.career.retry();
            }
            Route::Dashboard { .. } => self.dashboard.data.retry(),
            Route::Help => {}
        }
        self.set_status("Reloading");
        self.activate();
    }

    /// Send the requests for every `Idle` slot of the current view.
    fn activate(&mut self) {
        let mut cmds = Vec::new();
        match self.route().clone() {
            Route::Standings => {
                if self.standings.data.begin() {
                    cmds.push(WorkerCommand::LoadStandings {
                        season: self.standings.season,
                    });
                }
            }
            Route::TeamFilter => {
                self.request_teams(&mut cmds);
                if let Some((team, kind, season)) = &self.team_filter.query {
                    if self.team_filter.report.begin() {
                        cmds.push(WorkerCommand::LoadTeamReport {
                            kind: *kind,
                            team_id: team.id,
                            season: *season,
                        });
                    }
                }
            }
            Route::Roster { .. } => {
                if self.roster.data.begin() {
                    cmds.push(WorkerCommand::LoadRoster {
                        team_id: self.roster.team_id,
                        season: self.roster.season,
                    });
                }
            }
            Route::Player { .. } => {
                self.request_teams(&mut cmds);
                let p = &mut self.player;
                if p.profile.begin() {
                    cmds.push(WorkerCommand::LoadProfile {
                        player_id: p.player_id,
                        team_abbr: p.team_abbr.clone(),
                    });
                }
                // Games are requested with the profile's team id, so they
                // wait for the profile to settle.
                let profile_settled = !p.profile.is_loading() && !p.profile.is_idle();
                if profile_settled && p.games.begin() {
                    cmds.push(WorkerCommand::LoadPlayerGames {
                        player_id: p.player_id,
                        season: p.season,
                        team_id: p.team_id(),
                    });
                }
                if let Some(opp) = &p.opponent {
                    if p.split.begin() {
                        cmds.push(WorkerCommand::LoadOpponentSplit {
                            player_id: p.player_id,
                            season: p.season,
                            opponent_id: opp.id,
                        });
                    }
                }
                if let Some((team_id, request)) = p.pending_model {
                    if p.prediction.begin() {
                        cmds.push(WorkerCommand::Predict {
                            player_id: p.player_id,
                            team_id,
                            request,
                        });
                    }
                }
            }
            Route::PlayerStats { .. } => {
                let v = &mut self.player_stats;
                if v.profile.begin() {
                    cmds.push(WorkerCommand::LoadProfile {
                        player_id: v.player_id,
                        team_abbr: v.team_abbr.clone(),
                    });
                }
                if v.season_stats.begin() {
                    cmds.push(WorkerCommand::LoadSeasonStats {
                        player_id: v.player_id,
                        season: v.season,
                    });
                }
                if v.career.begin() {
                    cmds.push(WorkerCommand::LoadCareer {
                        player_id: v.player_id,
                    });
                }
            }
            Route::Dashboard { .. } => {
                let v = &mut self.dashboard;
                if v.data.begin() {
                    cmds.push(WorkerCommand::LoadDashboard {
                        player_id: v.player_id,
                        team_abbr: v.team_abbr.clone(),
                        season: v.season,
                    });
                }
            }
            Route::Help => {}
        }
        for cmd in cmds {
            self.send(cmd);
        }
    }

    fn request_teams(&mut self, cmds: &mut Vec<WorkerCommand>) {
        if self.teams.begin() {
            cmds.push(WorkerCommand::LoadStandings {
                season: self.default_season,
            });
        }
    }

    fn send(&mut self, cmd: WorkerCommand) {
        if self.worker_tx.send((self.generation, cmd)).is_err() {
            self.push_error(
                ErrorCategory::Other,
                "Background worker is not running".into(),
                String::new(),
            );
        }
    }

    // ── Worker responses ──────────────────────────────────────────────

    /// Apply a worker response, dropping it when it belongs to a view the
    /// user has already left.
    pub fn apply_response(&mut self, resp: WorkerResponse) {
        if resp.generation != self.generation {
            debug!(
                stale = resp.generation,
                current = self.generation,
                "dropping stale response"
            );
            return;
        }
        let context = resp.payload.context();
        if let Some(err) = payload_error(&resp.payload) {
            warn!(context, error = %err, "backend request failed");
            if !matches!(err, ApiError::NotFound { .. }) {
                self.push_error(ErrorCategory::of(err), err.to_string(), context.to_string());
            }
        }

        match resp.payload {
            Payload::Standings(season, result) => {
                match &result {
                    Ok(standings) => self.teams = Loadable::Ready(standings.all_teams()),
                    Err(e) if self.teams.is_loading() => {
                        self.teams = Loadable::Failed(e.to_string())
                    }
                    Err(_) => {}
                }
                if self.standings.data.is_loading() && self.standings.season == season {
                    self.standings.data.settle(result);
                    self.standings.cursor = step(self.standings.cursor, self.standings.team_count(), 0);
                }
            }
            Payload::Roster(team_id, result) => {
                if team_id == self.roster.team_id {
                    self.roster.data.settle(result);
                    self.roster.cursor = 0;
                }
            }
            Payload::TeamReport(_, result) => {
                self.team_filter.report.settle(result);
                self.team_filter.scroll = 0;
            }
            Payload::Profile(result) => {
                if self.player_stats.profile.is_loading() {
                    self.player_stats.profile.settle(result.clone());
                }
                if self.player.profile.is_loading() {
                    self.player.profile.settle(result);
                }
            }
            Payload::PlayerGames(result) => {
                self.player.games = match result {
                    Ok(games) => Loadable::Ready(games),
                    Err(ApiError::NotFound { .. }) => Loadable::Ready(Vec::new()),
                    Err(e) => Loadable::Failed(e.to_string()),
                };
            }
            Payload::OpponentSplit(opponent_id, result) => {
                if self.player.opponent.as_ref().map(|t| t.id) == Some(opponent_id) {
                    self.player.split = match result {
                        Ok(split) => Loadable::Ready(split),
                        Err(ApiError::NotFound { .. }) => Loadable::Ready(OpponentSplit::default()),
                        Err(e) => Loadable::Failed(e.to_string()),
                    };
                    self.player.scroll = 0;
                }
            }
            Payload::SeasonStats(season, result) => {
                if season == self.player_stats.season {
                    self.player_stats.season_stats.settle(result);
                }
            }
            Payload::Career(result) => self.player_stats.career.settle(result),
            Payload::Dashboard(result) => self.dashboard.data.settle(result),
            Payload::Prediction(result) => self.player.prediction.settle(result),
        }

        // A settled profile unblocks the player's game log.
        self.activate();
    }

    // ── Cursor and selection ──────────────────────────────────────────

    pub fn move_cursor(&mut self, delta: isize) {
        match self.route().clone() {
            Route::Standings => {
                let len = self.standings.team_count();
                self.standings.cursor = step(self.standings.cursor, len, delta);
            }
            Route::TeamFilter => {
                let len = self.teams.ready().map(Vec::len).unwrap_or(0);
                self.team_filter.cursor = step(self.team_filter.cursor, len, delta);
            }
            Route::Roster { .. } => {
                let len = self.roster.data.ready().map(Vec::len).unwrap_or(0);
                self.roster.cursor = step(self.roster.cursor, len, delta);
            }
            Route::Player { .. } => {
                let len = self.player.visible_games().map(<[GameLog]>::len).unwrap_or(0);
                self.player.scroll = step(self.player.scroll, len, delta);
            }
            Route::Help => {
                self.help_scroll = (self.help_scroll as isize + delta).max(0) as usize;
            }
            Route::PlayerStats { .. } | Route::Dashboard { .. } => {}
        }
    }

    /// Enter: open the selection or run the view's query.
    pub fn select(&mut self) {
        match self.route().clone() {
            Route::Standings => {
                if let Some(team) = self.standings.selected() {
                    self.navigate(Route::Roster {
                        team_id: team.id,
                        team_name: team.name,
                    });
                }
            }
            Route::TeamFilter => self.run_team_report(),
            Route::Roster { .. } => {
                let entry = self
                    .roster
                    .data
                    .ready()
                    .and_then(|r| r.get(self.roster.cursor))
                    .cloned();
                if let Some(entry) = entry {
                    self.navigate(Route::Player {
                        player_id: entry.id,
                        team_abbr: entry.team.unwrap_or_default(),
                    });
                }
            }
            Route::Player { .. } => match self.player.tab {
                PlayerTab::Info => self.open_dashboard(),
                PlayerTab::Games => self.apply_opponent_filter(),
                PlayerTab::Probability => self.submit_model(),
            },
            Route::PlayerStats { .. } | Route::Dashboard { .. } | Route::Help => {}
        }
    }

    /// `s`: next season for the current view, refetching what depends on it.
    pub fn next_season(&mut self) {
        let season = match self.route().clone() {
            Route::Standings => {
                self.standings.season = cycle_season(self.standings.season);
                self.standings.data = Loadable::Idle;
                self.standings.cursor = 0;
                self.standings.season
            }
            Route::TeamFilter => {
                self.team_filter.season = cycle_season(self.team_filter.season);
                self.team_filter.season
            }
            Route::Roster { .. } => {
                self.roster.season = cycle_season(self.roster.season);
                self.roster.data = Loadable::Idle;
                self.roster.season
            }
            Route::Player { .. } => {
                let p = &mut self.player;
                p.season = cycle_season(p.season);
                p.games = Loadable::Idle;
                if p.opponent.is_some() {
                    p.split = Loadable::Idle;
                }
                p.scroll = 0;
                p.season
            }
            Route::PlayerStats { .. } => {
                self.player_stats.season = cycle_season(self.player_stats.season);
                self.player_stats.season_stats = Loadable::Idle;
                self.player_stats.season
            }
            Route::Dashboard { .. } => {
                self.dashboard.season = cycle_season(self.dashboard.season);
                self.dashboard.data = Loadable::Idle;
                self.dashboard.season
            }
            Route::Help => return,
        };
        self.set_status(format!("Season {season}"));
        self.refresh();
    }

    // ── Team reports ──────────────────────────────────────────────────

    pub fn cycle_report_kind(&mut self, forward: bool) {
        self.team_filter.cycle_kind(forward);
    }

    fn run_team_report(&mut self) {
        let team = self
            .teams
            .ready()
            .and_then(|t| t.get(self.team_filter.cursor))
            .cloned();
        let Some(team) = team else {
            self.set_warning("No team selected");
            return;
        };
        let v = &mut self.team_filter;
        v.query = Some((team, v.kind, v.season));
        v.report = Loadable::Idle;
        self.refresh();
    }

    // ── Player view ───────────────────────────────────────────────────

    pub fn next_tab(&mut self, forward: bool) {
        let tab = self.player.tab;
        self.player.tab = if forward { tab.next() } else { tab.prev() };
    }

    /// Opponent picker entries: "all opponents" plus every cached team.
    pub fn opponent_choices(&self) -> usize {
        1 + self.teams.ready().map(Vec::len).unwrap_or(0)
    }

    pub fn opponent_label(&self, cursor: usize) -> String {
        match cursor {
            0 => "All opponents".to_string(),
            i => self
                .teams
                .ready()
                .and_then(|t| t.get(i - 1))
                .map(|t| t.name.clone())
                .unwrap_or_else(|| "All opponents".to_string()),
        }
    }

    pub fn cycle_opponent(&mut self, forward: bool) {
        let n = self.opponent_choices();
        let c = self.player.opponent_cursor;
        self.player.opponent_cursor = if forward { (c + 1) % n } else { (c + n - 1) % n };
    }

    /// Apply the picked opponent: all opponents shows the season log,
    /// anything else fetches the head-to-head split.
    pub fn apply_opponent_filter(&mut self) {
        let picked = match self.player.opponent_cursor {
            0 => None,
            i => self.teams.ready().and_then(|t| t.get(i - 1)).cloned(),
        };
        let p = &mut self.player;
        p.scroll = 0;
        match picked {
            None => {
                p.opponent = None;
                p.split = Loadable::Idle;
            }
            Some(team) => {
                p.opponent = Some(team);
                p.split = Loadable::Idle;
                self.refresh();
            }
        }
    }

    pub fn cycle_model(&mut self) {
        let p = &mut self.player;
        p.form.kind = p.form.kind.next();
        p.form.input.clear();
        p.pending_model = None;
        p.prediction = Loadable::Idle;
    }

    pub fn cycle_metric(&mut self) {
        self.player.form.metric = self.player.form.metric.next();
    }

    pub fn toggle_gamlss_model(&mut self) {
        if self.player.form.kind == ModelKind::Gamlss {
            self.player.form.gamlss_model = self.player.form.gamlss_model.toggle();
        }
    }

    pub fn submit_model(&mut self) {
        let request = match self.player.form.request() {
            Ok(r) => r,
            Err(msg) => {
                self.set_warning(msg);
                return;
            }
        };
        let Some(team_id) = self.player.team_id() else {
            self.set_warning("Team id not found for this player.");
            return;
        };
        self.player.pending_model = Some((team_id, request));
        self.player.prediction = Loadable::Idle;
        self.set_status(format!("Running {}", self.player.form.kind));
        self.activate();
    }

    pub fn open_dashboard(&mut self) {
        if let Route::Player {
            player_id,
            team_abbr,
        } = self.route().clone()
        {
            self.navigate(Route::Dashboard {
                player_id,
                team_abbr,
            });
        }
    }

    pub fn open_player_stats(&mut self) {
        if let Route::Player {
            player_id,
            team_abbr,
        } = self.route().clone()
        {
            self.navigate(Route::PlayerStats {
                player_id,
                team_abbr,
            });
        }
    }

    // ── Status and errors ─────────────────────────────────────────────

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

fn payload_error(payload: &Payload) -> Option<&ApiError> {
    match payload {
        Payload::Standings(_, r) => r.as_ref().err(),
        Payload::Roster(_, r) => r.as_ref().err(),
        Payload::TeamReport(_, r) => r.as_ref().err(),
        Payload::Profile(r) => r.as_ref().err(),
        Payload::PlayerGames(r) => r.as_ref().err(),
        Payload::OpponentSplit(_, r) => r.as_ref().err(),
        Payload::SeasonStats(_, r) => r.as_ref().err(),
        Payload::Career(r) => r.as_ref().err(),
        Payload::Dashboard(r) => r.as_ref().err(),
        Payload::Prediction(r) => r.as_ref().err(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_core::domain::TeamStanding;
    use std::sync::mpsc;

    fn app() -> (AppState, mpsc::Receiver<(u64, WorkerCommand)>) {
        let (tx, rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let app = AppState::new(tx, resp_rx, Season::current(), "http://test".into());
        (app, rx)
    }

    fn standing(id: u64, name: &str) -> TeamStanding {
        TeamStanding {
            rank: 1.0,
            team: name.into(),
            team_id: id,
            wins: 10.0,
            losses: 5.0,
        }
    }

    fn standings() -> Standings {
        Standings {
            eastern: vec![standing(1, "Boston Celtics"), standing(2, "New York Knicks")],
            western: vec![standing(3, "Denver Nuggets")],
        }
    }

    fn drain(rx: &mpsc::Receiver<(u64, WorkerCommand)>) -> Vec<(u64, WorkerCommand)> {
        rx.try_iter().collect()
    }

    #[test]
    fn tab_cycle() {
        assert_eq!(PlayerTab::Info.next(), PlayerTab::Games);
        assert_eq!(PlayerTab::Probability.next(), PlayerTab::Info);
        assert_eq!(PlayerTab::Info.prev(), PlayerTab::Probability);
    }

    #[test]
    fn season_cycle_wraps() {
        assert_eq!(cycle_season(Season::new(2024)), Season::new(2023));
        assert_eq!(cycle_season(Season::new(2023)), Season::new(2024));
        assert_eq!(cycle_season(Season::new(1999)), Season::new(2024));
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _rx) = app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Other, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn navigation_is_a_stack() {
        let (mut app, _rx) = app();
        app.navigate(Route::TeamFilter);
        app.navigate(Route::Help);
        assert_eq!(app.depth(), 3);
        app.back();
        assert_eq!(app.route(), &Route::TeamFilter);
        app.home();
        assert_eq!(app.route(), &Route::Standings);
        app.back();
        assert_eq!(app.depth(), 1);
    }

    #[test]
    fn refresh_requests_standings_with_generation() {
        let (mut app, rx) = app();
        app.refresh();
        let sent = drain(&rx);
        assert_eq!(
            sent,
            vec![(
                1,
                WorkerCommand::LoadStandings {
                    season: Season::current()
                }
            )]
        );
        assert!(app.standings.data.is_loading());
    }

    #[test]
    fn stale_responses_are_dropped() {
        let (mut app, _rx) = app();
        app.refresh();
        let old = app.generation;
        app.navigate(Route::Help);
        app.apply_response(WorkerResponse {
            generation: old,
            payload: Payload::Standings(Season::current(), Ok(standings())),
        });
        assert!(app.teams.is_idle());
        assert!(app.standings.data.is_idle());
    }

    #[test]
    fn standings_enter_opens_roster() {
        let (mut app, rx) = app();
        app.refresh();
        app.apply_response(WorkerResponse {
            generation: app.generation,
            payload: Payload::Standings(Season::current(), Ok(standings())),
        });
        app.move_cursor(2);
        app.select();
        assert_eq!(
            app.route(),
            &Route::Roster {
                team_id: 3,
                team_name: "Denver Nuggets".into()
            }
        );
        let sent = drain(&rx);
        assert!(sent.iter().any(|(_, c)| matches!(
            c,
            WorkerCommand::LoadRoster { team_id: 3, .. }
        )));
    }

    #[test]
    fn player_games_wait_for_profile_team_id() {
        let (mut app, rx) = app();
        app.navigate(Route::Player {
            player_id: 9,
            team_abbr: "NYK".into(),
        });
        let first = drain(&rx);
        assert!(first
            .iter()
            .all(|(_, c)| !matches!(c, WorkerCommand::LoadPlayerGames { .. })));

        app.apply_response(WorkerResponse {
            generation: app.generation,
            payload: Payload::Profile(Ok(PlayerProfile {
                name: "Jalen Brunson".into(),
                team_id: Some(1_610_612_752),
                ..PlayerProfile::default()
            })),
        });
        let second = drain(&rx);
        assert!(second.iter().any(|(_, c)| matches!(
            c,
            WorkerCommand::LoadPlayerGames {
                player_id: 9,
                team_id: Some(1_610_612_752),
                ..
            }
        )));
        assert_eq!(app.player.name(), Some("Jalen Brunson"));
    }

    #[test]
    fn missing_games_become_empty_table() {
        let (mut app, _rx) = app();
        app.navigate(Route::Player {
            player_id: 9,
            team_abbr: "NYK".into(),
        });
        app.apply_response(WorkerResponse {
            generation: app.generation,
            payload: Payload::PlayerGames(Err(ApiError::NotFound {
                endpoint: "/player-games/9".into(),
            })),
        });
        assert_eq!(app.player.games, Loadable::Ready(Vec::new()));
        assert!(app.error_history.is_empty());
    }

    #[test]
    fn failures_are_recorded() {
        let (mut app, _rx) = app();
        app.refresh();
        app.apply_response(WorkerResponse {
            generation: app.generation,
            payload: Payload::Standings(
                Season::current(),
                Err(ApiError::NetworkUnreachable("refused".into())),
            ),
        });
        assert!(matches!(app.standings.data, Loadable::Failed(_)));
        assert_eq!(app.error_history[0].category, ErrorCategory::Network);
        assert_eq!(app.error_history[0].context, "standings");

        app.reload();
        assert!(app.standings.data.is_loading());
    }

    #[test]
    fn model_form_validates_input() {
        let mut form = ModelForm::default();
        assert!(form.request().is_err());
        for c in "-2.5.".chars() {
            form.push_char(c);
        }
        assert_eq!(form.input, "-2.5");
        assert!(matches!(
            form.request(),
            Ok(ModelRequest::Gumbel(GumbelRequest { x, .. })) if x == -2.5
        ));
        form.kind = ModelKind::Linear;
        assert_eq!(form.value_label(), None);
        assert!(form.request().is_ok());
    }

    #[test]
    fn submit_needs_team_id() {
        let (mut app, rx) = app();
        app.navigate(Route::Player {
            player_id: 9,
            team_abbr: "NYK".into(),
        });
        app.player.form.kind = ModelKind::Linear;
        drain(&rx);

        app.submit_model();
        assert!(drain(&rx).is_empty());
        assert!(matches!(
            app.status_message,
            Some((_, StatusLevel::Warning))
        ));

        app.player.profile = Loadable::Ready(PlayerProfile {
            team_id: Some(5),
            ..PlayerProfile::default()
        });
        app.player.games = Loadable::Ready(Vec::new());
        app.submit_model();
        let sent = drain(&rx);
        assert!(sent.iter().any(|(_, c)| matches!(
            c,
            WorkerCommand::Predict {
                player_id: 9,
                team_id: 5,
                ..
            }
        )));
        assert!(app.player.prediction.is_loading());
    }

    #[test]
    fn opponent_filter_fetches_split() {
        let (mut app, rx) = app();
        app.navigate(Route::Player {
            player_id: 9,
            team_abbr: "NYK".into(),
        });
        app.teams = Loadable::Ready(standings().all_teams());
        app.player.profile = Loadable::Ready(PlayerProfile::default());
        app.player.games = Loadable::Ready(Vec::new());
        drain(&rx);

        app.cycle_opponent(true);
        assert_eq!(app.opponent_label(app.player.opponent_cursor), "Boston Celtics");
        app.apply_opponent_filter();
        let sent = drain(&rx);
        assert!(sent.iter().any(|(_, c)| matches!(
            c,
            WorkerCommand::LoadOpponentSplit { opponent_id: 1, .. }
        )));

        app.cycle_opponent(false);
        app.apply_opponent_filter();
        assert!(app.player.opponent.is_none());
        assert_eq!(app.player.visible_games(), Some(&[][..]));
    }
}
