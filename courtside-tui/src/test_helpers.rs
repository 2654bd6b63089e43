//! Test helpers: a detached app state and a text dump of rendered frames.

use std::sync::mpsc;

use courtside_core::domain::{GameLog, Season, Standings, TeamStanding};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};

use crate::app::{AppState, Overlay};
use crate::worker::WorkerCommand;

/// App state whose worker channel goes nowhere; the receiver is returned so
/// tests can inspect what would have been sent.
pub fn test_app() -> (AppState, mpsc::Receiver<(u64, WorkerCommand)>) {
    let (tx, rx) = mpsc::channel();
    let (_resp_tx, resp_rx) = mpsc::channel();
    let mut app = AppState::new(tx, resp_rx, Season::current(), "http://127.0.0.1:8000".into());
    app.overlay = Overlay::None;
    (app, rx)
}

pub fn standing(team_id: u64, name: &str, wins: f64, losses: f64) -> TeamStanding {
    TeamStanding {
        rank: 1.0,
        team: name.into(),
        team_id,
        wins,
        losses,
    }
}

pub fn sample_standings() -> Standings {
    Standings {
        eastern: vec![
            standing(1_610_612_739, "Cleveland Cavaliers", 64.0, 18.0),
            standing(1_610_612_738, "Boston Celtics", 61.0, 21.0),
            standing(1_610_612_752, "New York Knicks", 51.0, 31.0),
        ],
        western: vec![
            standing(1_610_612_760, "Oklahoma City Thunder", 68.0, 14.0),
            standing(1_610_612_743, "Denver Nuggets", 50.0, 32.0),
        ],
    }
}

pub fn game(points: f64, rebounds: f64, assists: f64) -> GameLog {
    GameLog {
        game_date: Some("2025-01-10T00:00:00".into()),
        opponent: Some("BOS".into()),
        points,
        rebounds,
        assists,
        result: Some("W".into()),
        ..GameLog::default()
    }
}

/// Render with `draw` into a `width × height` test terminal and return the
/// screen as text, one line per row.
pub fn render_to_string(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(draw).unwrap();
    buffer_text(terminal.backend().buffer())
}

pub fn buffer_text(buf: &Buffer) -> String {
    let mut out = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            out.push_str(buf.cell((x, y)).unwrap().symbol());
        }
        out.push('\n');
    }
    out
}
