//! Top-level UI layout: one route view framed by a title block, status bar below.

pub mod box_plot;
pub mod dashboard;
pub mod help;
pub mod overlays;
pub mod player;
pub mod player_stats;
pub mod roster;
pub mod standings;
pub mod status_bar;
pub mod tables;
pub mod team_filter;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Loadable, Overlay, Route};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    draw_route(f, main_area, app);
    status_bar::render(f, status_area, app);

    match app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, main_area, &app.backend_url),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

fn draw_route(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} ", title(app)))
        .title_style(theme::panel_title(true))
        .title_bottom(Line::from(Span::styled(
            format!(" {} ", app.breadcrumb()),
            theme::muted(),
        )));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match app.route() {
        Route::Standings => standings::render(f, inner, app),
        Route::TeamFilter => team_filter::render(f, inner, app),
        Route::Roster { .. } => roster::render(f, inner, app),
        Route::Player { .. } => player::render(f, inner, app),
        Route::PlayerStats { .. } => player_stats::render(f, inner, app),
        Route::Dashboard { .. } => dashboard::render(f, inner, app),
        Route::Help => help::render(f, inner, app),
    }
}

/// Title for the current route, naming the team or player when known.
pub fn title(app: &AppState) -> String {
    match app.route() {
        Route::Standings => format!("NBA Standings {}", app.standings.season),
        Route::TeamFilter => "Team Reports".to_string(),
        Route::Roster { team_name, .. } => format!("{team_name} · {}", app.roster.season),
        Route::Player { player_id, .. } => app
            .player
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Player {player_id}")),
        Route::PlayerStats { player_id, .. } => {
            match app.player_stats.profile.ready().map(|p| p.name.as_str()) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => format!("Player {player_id}"),
            }
        }
        Route::Dashboard { .. } => match app.dashboard.data.ready() {
            Some(d) => d.title(),
            None => format!("Dashboard · {}", app.dashboard.season),
        },
        Route::Help => "Help".to_string(),
    }
}

/// Placeholder text for a slot that has nothing to show yet, or `None` when
/// the slot is ready.
pub fn placeholder<T>(slot: &Loadable<T>) -> Option<Paragraph<'static>> {
    match slot {
        Loadable::Ready(_) => None,
        Loadable::Idle | Loadable::Loading => {
            Some(Paragraph::new(Span::styled("Loading…", theme::muted())))
        }
        Loadable::Failed(msg) => Some(Paragraph::new(vec![
            Line::from(Span::styled(format!("Request failed: {msg}"), theme::negative())),
            Line::from(Span::styled("Press r to retry.", theme::muted())),
        ])),
    }
}

/// Single muted line, for empty-state messages.
pub fn message(text: &str) -> Paragraph<'static> {
    Paragraph::new(Span::styled(text.to_string(), theme::muted()))
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
