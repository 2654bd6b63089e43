//! Team reports: pick a team and a report kind, then fetch.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use courtside_core::domain::{TeamReport, TeamReportKind};

use crate::app::{AppState, Loadable};
use crate::theme;
use crate::ui::{message, placeholder, tables};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)])
        .split(area);

    render_team_list(f, cols[0], app);
    render_report(f, cols[1], app);
}

fn render_team_list(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Teams ")
        .title_style(theme::panel_title(true));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(p) = placeholder(&app.teams) {
        f.render_widget(p, inner);
        return;
    }
    let teams = app.teams.ready().map(Vec::as_slice).unwrap_or(&[]);
    if teams.is_empty() {
        f.render_widget(message("No teams available."), inner);
        return;
    }

    let cursor = app.team_filter.cursor;
    let (start, end) = tables::window(cursor, teams.len(), inner.height as usize);
    let lines: Vec<Line> = teams[start..end]
        .iter()
        .enumerate()
        .map(|(offset, t)| {
            let style = if start + offset == cursor {
                theme::selected()
            } else {
                theme::text()
            };
            Line::from(Span::styled(format!(" {}", t.name), style))
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn render_report(f: &mut Frame, area: Rect, app: &AppState) {
    let view = &app.team_filter;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    // Report kind selector and season.
    let mut spans = vec![Span::styled(" Report: ", theme::muted())];
    for kind in TeamReportKind::ALL {
        let style = if kind == view.kind {
            theme::selected()
        } else {
            theme::muted()
        };
        spans.push(Span::styled(format!(" {} ", kind.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(format!("  Season {}", view.season), theme::neutral()));
    f.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

    let body = rows[1];
    let Some((team, kind, season)) = &view.query else {
        f.render_widget(
            message("Pick a team and a report, then press Enter."),
            body,
        );
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(format!(" {} · {} · {} ", team.name, kind.label(), season))
        .title_style(theme::panel_title(false));
    let inner = block.inner(body);
    f.render_widget(block, body);

    if let Some(p) = placeholder(&view.report) {
        f.render_widget(p, inner);
        return;
    }
    if let Loadable::Ready(report) = &view.report {
        let lines = report_lines(report, view.scroll, inner.height as usize);
        f.render_widget(Paragraph::new(lines), inner);
    }
}

/// Every section of a normalized report, stacked.
pub fn report_lines(report: &TeamReport, scroll: usize, height: usize) -> Vec<Line<'static>> {
    if report.is_empty() {
        return vec![Line::from(Span::styled(
            "No data found for this query.",
            theme::muted(),
        ))];
    }

    let mut lines = Vec::new();
    if !report.stats.is_empty() {
        lines.push(Line::from(Span::styled("General Stats", theme::accent_bold())));
        lines.extend(tables::key_values(&report.stats.rows));
        lines.push(Line::from(""));
    }
    if !report.defensive_stats.is_empty() {
        lines.push(Line::from(Span::styled("Defensive Stats", theme::accent_bold())));
        lines.extend(tables::key_values(&report.defensive_stats.rows));
        lines.push(Line::from(""));
    }
    if !report.rows.is_empty() {
        let remaining = height.saturating_sub(lines.len()).max(2);
        lines.extend(tables::grid(
            &report.rows.columns,
            &report.rows.rows,
            None,
            scroll,
            remaining,
        ));
    }
    lines
}
