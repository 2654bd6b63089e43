//! Conference standings, East and West side by side.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use courtside_core::domain::{fmt_num, TeamStanding};

use crate::app::AppState;
use crate::theme::{self, Theme};
use crate::ui::{message, placeholder, tables};

const COLUMNS: [&str; 5] = ["Rank", "Team", "W", "L", "Pct"];

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let view = &app.standings;
    if let Some(p) = placeholder(&view.data) {
        f.render_widget(p, area);
        return;
    }
    let Some(standings) = view.data.ready() else {
        return;
    };
    if standings.is_empty() {
        f.render_widget(message("No standings available for this season."), area);
        return;
    }

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let east_len = standings.eastern.len();
    let east_cursor = (view.cursor < east_len).then_some(view.cursor);
    let west_cursor = view.cursor.checked_sub(east_len);

    conference(f, halves[0], "Eastern Conference", &standings.eastern, east_cursor);
    conference(f, halves[1], "Western Conference", &standings.western, west_cursor);
}

fn conference(
    f: &mut Frame,
    area: Rect,
    title: &str,
    teams: &[TeamStanding],
    cursor: Option<usize>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(cursor.is_some()))
        .title(format!(" {title} "))
        .title_style(theme::panel_title(cursor.is_some()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows: Vec<Vec<String>> = teams
        .iter()
        .map(|t| {
            vec![
                fmt_num(t.rank),
                t.team.clone(),
                fmt_num(t.wins),
                fmt_num(t.losses),
                format!("{:.3}", t.win_pct()),
            ]
        })
        .collect();

    let mut lines = tables::grid(&COLUMNS, &rows, cursor, 0, inner.height as usize);

    // Colour the percentage column of unselected rows by record.
    let palette = Theme::default();
    let body = inner.height.saturating_sub(1) as usize;
    let (start, _) = tables::window(cursor.unwrap_or(0), teams.len(), body);
    for (offset, line) in lines.iter_mut().skip(1).enumerate() {
        let i = start + offset;
        if cursor == Some(i) {
            continue;
        }
        if let (Some(team), Some(span)) = (teams.get(i), line.spans.get_mut(4)) {
            let style = Style::default().fg(palette.win_pct_color(team.win_pct()));
            *span = Span::styled(span.content.clone(), style);
        }
    }

    if teams.is_empty() {
        lines.push(Line::from(Span::styled("No teams.", theme::muted())));
    }
    f.render_widget(Paragraph::new(lines), inner);
}
