//! Courtside CLI: one-shot queries against the stats backend.
//!
//! Commands:
//! - `standings`, `roster`, `team` for league and team data
//! - `player`, `games`, `season-stats`, `career` for one player
//! - `summarize` for mean / median / mode / quartiles / outliers, from the
//!   backend's game log or from values given on the command line
//! - `predict` for the backend's Gumbel, regression and GAMLSS models
//!
//! Every command prints an aligned table by default, or `--format json|csv`.

mod output;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use courtside_core::api::ModelRequest;
use courtside_core::domain::{
    fmt_num, GameLog, GamlssModel, GamlssRequest, GeneralStats, GumbelRequest,
    LinearRegressionRequest, LogisticRegressionRequest, ModelKind, TeamReportKind,
};
use courtside_core::{summarize, Config, Metric, MetricSummaries, Season, StatSummary, StatsClient};

use crate::output::{emit, Format, Tabular};

const LOG_ENV: &str = "COURTSIDE_LOG";

#[derive(Parser)]
#[command(
    name = "courtside",
    version,
    about = "Courtside CLI: NBA standings, players and projections from the stats backend"
)]
struct Cli {
    /// Config file (default: $COURTSIDE_CONFIG, then the user config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding config and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// More logging on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Conference standings.
    Standings {
        #[arg(long)]
        season: Option<Season>,
    },
    /// Players on a team.
    Roster {
        team_id: u64,
        #[arg(long)]
        season: Option<Season>,
    },
    /// A player's profile.
    Player {
        player_id: u64,
        /// Team abbreviation, e.g. NYK.
        team_abbr: String,
    },
    /// A player's game log, optionally against one opponent.
    Games {
        player_id: u64,
        #[arg(long)]
        season: Option<Season>,
        /// Only games played for this team.
        #[arg(long)]
        team_id: Option<u64>,
        /// Only games against this opponent team id.
        #[arg(long, conflicts_with = "team_id")]
        opponent: Option<u64>,
    },
    /// Season averages for a player.
    SeasonStats {
        player_id: u64,
        #[arg(long)]
        season: Option<Season>,
    },
    /// Career totals and averages.
    Career { player_id: u64 },
    /// A team report: victories, stats, defense or games.
    Team {
        team_id: u64,
        kind: TeamReportKind,
        #[arg(long)]
        season: Option<Season>,
    },
    /// Summary statistics per metric for a player's season, or for --values.
    Summarize {
        #[arg(required_unless_present = "values")]
        player_id: Option<u64>,
        #[arg(long)]
        season: Option<Season>,
        /// Comma-separated observations, summarized offline.
        #[arg(long, conflicts_with_all = ["player_id", "season"], allow_hyphen_values = true)]
        values: Option<String>,
    },
    /// Run a backend model for a player.
    Predict {
        /// gumbel, linear, logistic or gamlss.
        model_kind: ModelKind,
        player_id: u64,
        /// Team abbreviation, used to look up the player's team id.
        team_abbr: String,
        #[arg(long, default_value = "points")]
        metric: Metric,
        /// Threshold for the Gumbel model.
        #[arg(long, allow_negative_numbers = true)]
        x: Option<f64>,
        /// Limit for the logistic model.
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<f64>,
        /// Family for the GAMLSS model: poisson or linear.
        #[arg(long, default_value = "poisson")]
        model: GamlssModel,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("loading config")?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
        config.validate().context("--api-url")?;
    }
    debug!(?config, "config loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Offline summaries never touch the network.
    if let Commands::Summarize {
        values: Some(raw), ..
    } = &cli.command
    {
        let values = parse_values(raw)?;
        let summary = summarize(&values);
        let mut table = summary_table();
        table.push(summary_row("values", &summary));
        return emit(&mut out, cli.format, &summary, &[table]);
    }

    let client = StatsClient::from_config(&config.api).context("building HTTP client")?;
    info!(backend = client.base_url(), "querying backend");
    let season = |s: Option<Season>| s.unwrap_or(config.default_season);

    match cli.command {
        Commands::Standings { season: s } => {
            let standings = client.standings(season(s))?;
            let mut table = Tabular::new(&["Conference", "Rank", "Team", "Team ID", "W", "L", "Pct"]);
            for (conf, teams) in [("East", &standings.eastern), ("West", &standings.western)] {
                for t in teams {
                    table.push(vec![
                        conf.to_string(),
                        fmt_num(t.rank),
                        t.team.clone(),
                        t.team_id.to_string(),
                        fmt_num(t.wins),
                        fmt_num(t.losses),
                        format!("{:.3}", t.win_pct()),
                    ]);
                }
            }
            emit(&mut out, cli.format, &standings, &[table])
        }
        Commands::Roster { team_id, season: s } => {
            let roster = client.players(team_id, season(s))?;
            let mut table = Tabular::new(&["ID", "Name", "Age", "Team"]);
            for p in &roster {
                table.push(vec![
                    p.id.to_string(),
                    p.name.clone(),
                    p.age.map(|a| format!("{a:.0}")).unwrap_or_else(|| "N/A".into()),
                    p.team.clone().unwrap_or_else(|| "N/A".into()),
                ]);
            }
            emit(&mut out, cli.format, &roster, &[table])
        }
        Commands::Player {
            player_id,
            team_abbr,
        } => {
            let profile = client.player_profile(player_id, &team_abbr)?;
            let table = Tabular::pairs(&profile.info_rows()).titled(profile.name.clone());
            emit(&mut out, cli.format, &profile, &[table])
        }
        Commands::Games {
            player_id,
            season: s,
            team_id,
            opponent,
        } => match opponent {
            Some(opponent_id) => {
                let split = client.player_games_vs(player_id, season(s), opponent_id)?;
                let mut tables = vec![games_table(&split.games)];
                if let Some(stats) = &split.general_stats {
                    tables.push(general_stats_table(stats));
                }
                emit(&mut out, cli.format, &split, &tables)
            }
            None => {
                let games = client.player_games(player_id, season(s), team_id)?;
                emit(&mut out, cli.format, &games, &[games_table(&games)])
            }
        },
        Commands::SeasonStats { player_id, season: s } => {
            let stats = client.player_season_stats(player_id, season(s))?;
            let table = Tabular::pairs(&stats.rows).titled(format!("Season {}", season(s)));
            emit(&mut out, cli.format, &stats, &[table])
        }
        Commands::Career { player_id } => {
            let career = client.player_career_stats(player_id)?;
            let table = Tabular::pairs(&career.table().rows).titled("Career");
            emit(&mut out, cli.format, &career, &[table])
        }
        Commands::Team {
            team_id,
            kind,
            season: s,
        } => {
            let report = client.team_report(kind, team_id, season(s))?;
            let mut tables = Vec::new();
            if !report.stats.is_empty() {
                tables.push(Tabular::pairs(&report.stats.rows).titled("General Stats"));
            }
            if !report.defensive_stats.is_empty() {
                tables.push(Tabular::pairs(&report.defensive_stats.rows).titled("Defensive Stats"));
            }
            if !report.rows.is_empty() {
                let mut t = Tabular::new(&report.rows.columns).titled(kind.label());
                for row in &report.rows.rows {
                    t.push(row.clone());
                }
                tables.push(t);
            }
            if tables.is_empty() {
                tables.push(Tabular::new(&["Stat", "Value"]).titled(kind.label()));
            }
            emit(&mut out, cli.format, &report, &tables)
        }
        Commands::Summarize {
            player_id,
            season: s,
            ..
        } => {
            let Some(player_id) = player_id else {
                bail!("pass a player id or --values");
            };
            let games = client.player_games(player_id, season(s), None)?;
            let summaries = MetricSummaries::from_games(&games);
            let mut table = summary_table().titled(format!(
                "{} games, season {}",
                summaries.games,
                season(s)
            ));
            for metric in Metric::ALL {
                table.push(summary_row(metric.label(), summaries.get(metric)));
            }
            emit(&mut out, cli.format, &summaries, &[table])
        }
        Commands::Predict {
            model_kind,
            player_id,
            team_abbr,
            metric,
            x,
            limit,
            model,
        } => {
            let request = build_request(model_kind, metric, x, limit, model)?;
            let profile = client.player_profile(player_id, &team_abbr)?;
            let Some(team_id) = profile.team_id else {
                bail!("team id not found for player {player_id}");
            };
            let prediction = client.predict(player_id, team_id, &request)?;
            let table = Tabular::pairs(&prediction.summary_rows()).titled(model_kind.label());
            emit(&mut out, cli.format, &prediction, &[table])
        }
    }?;
    out.flush()?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// `1, 2,2.5` → `[1.0, 2.0, 2.5]`. Empty input is an empty set.
fn parse_values(raw: &str) -> Result<Vec<f64>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .map(|token| {
            let token = token.trim();
            let v: f64 = token
                .parse()
                .with_context(|| format!("'{token}' is not a number"))?;
            if !v.is_finite() {
                bail!("'{token}' is not a finite number");
            }
            Ok(v)
        })
        .collect()
}

fn build_request(
    kind: ModelKind,
    metric: Metric,
    x: Option<f64>,
    limit: Option<f64>,
    model: GamlssModel,
) -> Result<ModelRequest> {
    Ok(match kind {
        ModelKind::Gumbel => {
            let Some(x) = x else {
                bail!("the gumbel model needs --x");
            };
            ModelRequest::Gumbel(GumbelRequest { metric, x })
        }
        ModelKind::Linear => ModelRequest::Linear(LinearRegressionRequest { metric }),
        ModelKind::Logistic => {
            let Some(threshold) = limit else {
                bail!("the logistic model needs --limit");
            };
            ModelRequest::Logistic(LogisticRegressionRequest { metric, threshold })
        }
        ModelKind::Gamlss => ModelRequest::Gamlss(GamlssRequest { metric, model }),
    })
}

fn summary_table() -> Tabular {
    Tabular::new(&["Metric", "Mean", "Median", "Mode", "Min", "Q1", "Q3", "Max", "Outliers"])
}

fn summary_row(label: &str, s: &StatSummary) -> Vec<String> {
    let outliers = if s.outliers.is_empty() {
        "-".to_string()
    } else {
        s.outliers.iter().map(|&o| fmt_num(o)).collect::<Vec<_>>().join(" ")
    };
    vec![
        label.to_string(),
        fmt_num(s.mean),
        fmt_num(s.median),
        format!("{} ({}x)", fmt_num(s.mode.value), s.mode.frequency),
        fmt_num(s.min),
        fmt_num(s.q1),
        fmt_num(s.q3),
        fmt_num(s.max),
        outliers,
    ]
}

fn games_table(games: &[GameLog]) -> Tabular {
    let mut table = Tabular::new(&GameLog::TABLE_COLUMNS).titled("Games");
    for g in games {
        table.push(g.table_row());
    }
    table
}

fn general_stats_table(stats: &GeneralStats) -> Tabular {
    let mut table = Tabular::new(&GeneralStats::TABLE_COLUMNS).titled("General Stats");
    for row in stats.table_rows() {
        table.push(row);
    }
    table
}
