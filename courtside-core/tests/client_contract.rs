//! Contract tests for the stats client against a scripted backend.
//!
//! Checks the request each operation sends (method, path, body) and that
//! realistic, partially filled responses decode into usable records.

use std::sync::Arc;

use serde_json::json;

use courtside_core::api::{ApiError, Method, ModelRequest, ScriptedTransport, StatsClient};
use courtside_core::config::ApiConfig;
use courtside_core::domain::{
    GumbelRequest, LinearRegressionRequest, LogisticRegressionRequest, Metric, Prediction, Season,
};
use courtside_core::pipeline::PlayerDashboard;

// ── Helpers ──────────────────────────────────────────────────────────

fn setup() -> (Arc<ScriptedTransport>, StatsClient) {
    let transport = Arc::new(ScriptedTransport::new());
    let config = ApiConfig {
        base_url: "http://stats.test".into(),
        max_retries: 1,
        retry_base_delay_ms: 1,
        ..ApiConfig::default()
    };
    let client = StatsClient::new(transport.clone(), &config);
    (transport, client)
}

// ── Browsing ─────────────────────────────────────────────────────────

#[test]
fn roster_then_profile() {
    let (t, client) = setup();
    t.push_json(json!([
        {"id": 1628973, "name": "Jalen Brunson", "age": 28, "team": "NYK"},
        {"id": "1628969", "name": "Mikal Bridges", "age": null, "team": "NYK"}
    ]))
    .push_json(json!({
        "name": "Jalen Brunson", "position": "G", "team_id": 1610612752,
        "salary": null
    }));

    let roster = client.players(1_610_612_752, Season::new(2024)).unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[1].id, 1_628_969);
    assert!(roster[1].age.is_none());

    let profile = client.player_profile(roster[0].id, "NYK").unwrap();
    assert_eq!(profile.team_id, Some(1_610_612_752));
    assert!(profile.salary.is_none());

    let reqs = t.requests();
    assert_eq!(reqs[0].url, "http://stats.test/players/1610612752");
    assert_eq!(reqs[0].body, Some(json!({"season": "2024-25"})));
    assert_eq!(reqs[1].url, "http://stats.test/player-stats/1628973");
    assert_eq!(reqs[1].body, Some(json!({"team_abbreviation": "NYK"})));
}

#[test]
fn opponent_split_and_season_stats() {
    let (t, client) = setup();
    t.push_json(json!({
        "jogos": [
            {"game_date": "2025-01-10T00:00:00", "opponent": "BOS", "points": 33, "assists": 5, "rebounds": 3}
        ],
        "estatisticas_gerais": {"pontos": {"media": 33}}
    }))
    .push_json(json!({"pontos": 26.1, "assistencias": 7.4}));

    let split = client
        .player_games_vs(1, Season::new(2024), 1_610_612_738)
        .unwrap();
    assert_eq!(split.games[0].display_date(), "10/01/2025");
    assert_eq!(split.games[0].points, 33.0);

    let season = client.player_season_stats(1, Season::new(2024)).unwrap();
    assert_eq!(season.rows[1], ("assistencias".to_string(), "7.40".to_string()));

    let reqs = t.requests();
    assert_eq!(
        reqs[0].body,
        Some(json!({"season": "2024-25", "opponent_id": 1610612738u64}))
    );
}

#[test]
fn team_report_shapes() {
    let (t, client) = setup();
    t.push_json(json!({
        "team_stats_data": {"points": 117.3},
        "defensive_stats_data": {"steals": 7.9}
    }))
    .push_json(json!({"victories_data": [{"date": "2024-10-25", "opponent": "IND"}]}));

    let stats = client.team_stats(5, Season::current()).unwrap();
    assert_eq!(stats.stats.len(), 1);
    assert_eq!(stats.defensive_stats.rows[0].0, "steals");

    let wins = client.team_victories(5, Season::current()).unwrap();
    assert_eq!(wins.rows.columns, vec!["date", "opponent"]);
}

// ── Models ───────────────────────────────────────────────────────────

#[test]
fn each_model_hits_its_endpoint() {
    let (t, client) = setup();
    t.push_json(json!({"prob_acima": 0.31, "prob_abaixo": 0.69, "valores_menores": [12, 18]}))
        .push_json(json!({"media_prevista": 21.0}))
        .push_json(json!({"prob_min": 0.1, "prob_media": 0.5, "prob_max": 0.9}));

    let requests = [
        ModelRequest::Gumbel(GumbelRequest {
            metric: Metric::Points,
            x: 25.0,
        }),
        ModelRequest::Linear(LinearRegressionRequest {
            metric: Metric::Rebounds,
        }),
        ModelRequest::Logistic(LogisticRegressionRequest {
            metric: Metric::Assists,
            threshold: 10.0,
        }),
    ];
    let results: Vec<Prediction> = requests
        .iter()
        .map(|r| client.predict(77, 3, r).unwrap())
        .collect();

    match &results[0] {
        Prediction::Gumbel(g) => assert_eq!(g.values_at_or_below, vec![12.0, 18.0]),
        other => panic!("expected gumbel, got {other:?}"),
    }
    assert_eq!(results[2].summary_rows()[1].1, "0.50");

    let paths: Vec<String> = t.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        paths,
        vec![
            "http://stats.test/gumbel/probability/77",
            "http://stats.test/linear-regression/77",
            "http://stats.test/logistic-regression/77",
        ]
    );
    assert!(t.requests().iter().all(|r| r.method == Method::Post));
}

// ── Failure handling ─────────────────────────────────────────────────

#[test]
fn dashboard_reports_backend_errors() {
    let (t, client) = setup();
    t.push_status(503).push_status(503);
    let err = PlayerDashboard::load(&client, 1, "NYK", Season::current()).unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 503,
            endpoint: "/player-games/1".into()
        }
    );
    assert_eq!(t.requests().len(), 2);
}

#[test]
fn dashboard_summarizes_fetched_games() {
    let (t, client) = setup();
    t.push_json(json!([
        {"points": 1, "rebounds": 4, "assists": 2},
        {"points": 2, "rebounds": 4, "assists": 2},
        {"points": 2, "rebounds": 5, "assists": 9},
        {"points": 3, "rebounds": 6, "assists": null},
        {"points": 100, "rebounds": 7, "assists": 1}
    ]))
    .push_json(json!({"name": "Test Player"}));

    let d = PlayerDashboard::load(&client, 1, "NYK", Season::current()).unwrap();
    assert_eq!(d.summaries.points.outliers, vec![100.0]);
    assert_eq!(d.summaries.assists.min, 0.0);
    let rows = d.summaries.box_plot_rows();
    assert_eq!(rows[0].metric, Metric::Points);
    assert_eq!(rows[1].median, 5.0);
}
