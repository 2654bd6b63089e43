//! Typed client for the stats backend.
//!
//! Every operation is one HTTP request with a JSON body (except career
//! stats, which is a bare GET). Transient failures (connection errors,
//! timeouts, 5xx) are retried with exponential backoff; a call that still
//! fails counts once against the circuit breaker.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use super::circuit_breaker::CircuitBreaker;
use super::error::ApiError;
use super::transport::{HttpTransport, Method, Transport};
use crate::config::ApiConfig;
use crate::domain::{
    CareerStats, GameLog, GamlssRequest, GamlssResult, GumbelRequest, GumbelResult,
    LinearRegressionRequest, LinearRegressionResult, LogisticRegressionRequest,
    LogisticRegressionResult, ModelBody, OpponentSplit, PlayerProfile, Prediction, RosterEntry,
    Season, StatTable, Standings, TeamReport, TeamReportKind,
};

/// Model request of any kind, for callers that pick the model at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelRequest {
    Gumbel(GumbelRequest),
    Linear(LinearRegressionRequest),
    Logistic(LogisticRegressionRequest),
    Gamlss(GamlssRequest),
}

pub struct StatsClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    breaker: Arc<CircuitBreaker>,
    max_retries: u32,
    base_delay: Duration,
}

impl StatsClient {
    pub fn new(transport: Arc<dyn Transport>, config: &ApiConfig) -> Self {
        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            breaker: Arc::new(CircuitBreaker::new(
                config.failure_threshold,
                config.cooldown(),
            )),
            max_retries: config.max_retries,
            base_delay: config.retry_base_delay(),
        }
    }

    /// Client over a real HTTP connection.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(config.timeout())?;
        Ok(Self::new(Arc::new(transport), config))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn circuit_breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    /// Whether the breaker currently lets requests through.
    pub fn is_available(&self) -> bool {
        self.breaker.is_allowed()
    }

    // ── Standings & teams ─────────────────────────────────────────────

    pub fn standings(&self, season: Season) -> Result<Standings, ApiError> {
        let value = self.call(Method::Post, "/standings", Some(json!({ "season": season })))?;
        if value.is_null() {
            return Ok(Standings::default());
        }
        decode("/standings", value)
    }

    pub fn team_report(
        &self,
        kind: TeamReportKind,
        team_id: u64,
        season: Season,
    ) -> Result<TeamReport, ApiError> {
        let path = format!("{}/{team_id}", kind.path_prefix());
        let value = self.call(Method::Post, &path, Some(json!({ "season": season })))?;
        Ok(TeamReport::from_value(&value))
    }

    pub fn team_victories(&self, team_id: u64, season: Season) -> Result<TeamReport, ApiError> {
        self.team_report(TeamReportKind::Victories, team_id, season)
    }

    pub fn team_stats(&self, team_id: u64, season: Season) -> Result<TeamReport, ApiError> {
        self.team_report(TeamReportKind::GeneralStats, team_id, season)
    }

    pub fn defensive_stats(&self, team_id: u64, season: Season) -> Result<TeamReport, ApiError> {
        self.team_report(TeamReportKind::DefensiveStats, team_id, season)
    }

    pub fn team_games(&self, team_id: u64, season: Season) -> Result<TeamReport, ApiError> {
        self.team_report(TeamReportKind::Games, team_id, season)
    }

    // ── Players ───────────────────────────────────────────────────────

    pub fn players(&self, team_id: u64, season: Season) -> Result<Vec<RosterEntry>, ApiError> {
        let path = format!("/players/{team_id}");
        let value = self.call(Method::Post, &path, Some(json!({ "season": season })))?;
        decode_list(&path, value)
    }

    pub fn player_profile(
        &self,
        player_id: u64,
        team_abbreviation: &str,
    ) -> Result<PlayerProfile, ApiError> {
        let path = format!("/player-stats/{player_id}");
        let body = json!({ "team_abbreviation": team_abbreviation });
        let value = self.call(Method::Post, &path, Some(body))?;
        decode(&path, value)
    }

    /// Game log for one season, optionally restricted to one team's games.
    pub fn player_games(
        &self,
        player_id: u64,
        season: Season,
        team_id: Option<u64>,
    ) -> Result<Vec<GameLog>, ApiError> {
        let path = format!("/player-games/{player_id}");
        let mut body = Map::new();
        body.insert("season".into(), json!(season));
        if let Some(team_id) = team_id {
            body.insert("team_id".into(), json!(team_id));
        }
        let value = self.call(Method::Post, &path, Some(Value::Object(body)))?;
        decode_list(&path, value)
    }

    pub fn player_games_vs(
        &self,
        player_id: u64,
        season: Season,
        opponent_id: u64,
    ) -> Result<OpponentSplit, ApiError> {
        let path = format!("/player-games-against-team/{player_id}");
        let body = json!({ "season": season, "opponent_id": opponent_id });
        let value = self.call(Method::Post, &path, Some(body))?;
        if value.is_null() {
            return Ok(OpponentSplit::default());
        }
        decode(&path, value)
    }

    pub fn player_season_stats(
        &self,
        player_id: u64,
        season: Season,
    ) -> Result<StatTable, ApiError> {
        let path = format!("/player-season-stats/{player_id}");
        let value = self.call(Method::Post, &path, Some(json!({ "season": season })))?;
        Ok(StatTable::from_value(&value))
    }

    pub fn player_career_stats(&self, player_id: u64) -> Result<CareerStats, ApiError> {
        let path = format!("/player-career-stats/{player_id}");
        let value = self.call(Method::Get, &path, None)?;
        if value.is_null() {
            return Ok(CareerStats::default());
        }
        decode(&path, value)
    }

    // ── Models ────────────────────────────────────────────────────────

    pub fn gumbel_probability(
        &self,
        player_id: u64,
        team_id: u64,
        params: &GumbelRequest,
    ) -> Result<GumbelResult, ApiError> {
        if !params.x.is_finite() {
            return Err(ApiError::InvalidRequest("x must be a finite number".into()));
        }
        self.model_call("/gumbel/probability", player_id, team_id, params)
    }

    pub fn linear_regression(
        &self,
        player_id: u64,
        team_id: u64,
        params: &LinearRegressionRequest,
    ) -> Result<LinearRegressionResult, ApiError> {
        self.model_call("/linear-regression", player_id, team_id, params)
    }

    pub fn logistic_regression(
        &self,
        player_id: u64,
        team_id: u64,
        params: &LogisticRegressionRequest,
    ) -> Result<LogisticRegressionResult, ApiError> {
        if !params.threshold.is_finite() {
            return Err(ApiError::InvalidRequest("limit must be a finite number".into()));
        }
        self.model_call("/logistic-regression", player_id, team_id, params)
    }

    pub fn gamlss_prediction(
        &self,
        player_id: u64,
        team_id: u64,
        params: &GamlssRequest,
    ) -> Result<GamlssResult, ApiError> {
        self.model_call("/gamlss/prediction", player_id, team_id, params)
    }

    /// Run whichever model `request` names.
    pub fn predict(
        &self,
        player_id: u64,
        team_id: u64,
        request: &ModelRequest,
    ) -> Result<Prediction, ApiError> {
        Ok(match request {
            ModelRequest::Gumbel(p) => {
                Prediction::Gumbel(self.gumbel_probability(player_id, team_id, p)?)
            }
            ModelRequest::Linear(p) => {
                Prediction::Linear(self.linear_regression(player_id, team_id, p)?)
            }
            ModelRequest::Logistic(p) => {
                Prediction::Logistic(self.logistic_regression(player_id, team_id, p)?)
            }
            ModelRequest::Gamlss(p) => {
                Prediction::Gamlss(self.gamlss_prediction(player_id, team_id, p)?)
            }
        })
    }

    fn model_call<P: Serialize, R: DeserializeOwned + Default>(
        &self,
        prefix: &str,
        player_id: u64,
        team_id: u64,
        params: &P,
    ) -> Result<R, ApiError> {
        let path = format!("{prefix}/{player_id}");
        let body = serde_json::to_value(ModelBody { team_id, params })
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let value = self.call(Method::Post, &path, Some(body))?;
        if value.is_null() {
            return Ok(R::default());
        }
        decode(&path, value)
    }

    // ── Plumbing ──────────────────────────────────────────────────────

    /// One logical call: breaker check, retries, status mapping, JSON parse.
    /// An empty 2xx body decodes as `null`.
    fn call(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        if !self.breaker.is_allowed() {
            warn!(
                endpoint = path,
                remaining_secs = self.breaker.remaining_cooldown().as_secs(),
                "refusing call, circuit breaker open"
            );
            return Err(ApiError::CircuitOpen);
        }

        let url = format!("{}{path}", self.base_url);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = backoff_delay(self.base_delay, attempt);
                debug!(endpoint = path, attempt, delay_ms = delay.as_millis() as u64, "retrying");
                std::thread::sleep(delay);
            }

            debug!(
                method = method.as_str(),
                endpoint = path,
                transport = self.transport.name(),
                "request"
            );
            let outcome = self
                .transport
                .send(method, &url, body.as_ref())
                .and_then(|resp| interpret(path, resp.status, &resp.body));

            match outcome {
                Ok(value) => {
                    self.breaker.record_success();
                    return Ok(value);
                }
                Err(e) if e.is_retryable() => {
                    warn!(endpoint = path, attempt, error = %e, "transient failure");
                    last_error = Some(e);
                }
                Err(e) => {
                    // The backend answered, so it is healthy even if the
                    // request was not.
                    if !matches!(e, ApiError::InvalidRequest(_)) {
                        self.breaker.record_success();
                    }
                    warn!(endpoint = path, error = %e, "request failed");
                    return Err(e);
                }
            }
        }

        self.breaker.record_failure();
        Err(last_error.unwrap_or_else(|| ApiError::NetworkUnreachable("max retries exceeded".into())))
    }
}

/// `base * 2^(attempt-1)`, saturating instead of overflowing.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
    base.checked_mul(factor).unwrap_or(Duration::MAX)
}

fn interpret(endpoint: &str, status: u16, body: &str) -> Result<Value, ApiError> {
    match status {
        200..=299 => {
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str(body).map_err(|e| ApiError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })
        }
        404 => Err(ApiError::NotFound {
            endpoint: endpoint.to_string(),
        }),
        _ => Err(ApiError::Status {
            status,
            endpoint: endpoint.to_string(),
        }),
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

/// Lists decode leniently: `null` is empty.
fn decode_list<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<Vec<T>, ApiError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    decode(endpoint, value)
}
