//! Player view: profile info, game log with opponent filter, model projections.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use courtside_core::domain::{fmt_num, GameLog, GeneralStats, ModelKind, Prediction};

use crate::app::{AppState, Loadable, PlayerTab};
use crate::theme;
use crate::ui::{dashboard, message, placeholder, tables};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    render_tabs(f, rows[0], app);
    match app.player.tab {
        PlayerTab::Info => render_info(f, rows[1], app),
        PlayerTab::Games => render_games(f, rows[1], app),
        PlayerTab::Probability => render_probability(f, rows[1], app),
    }
}

fn render_tabs(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = vec![Span::raw(" ")];
    for tab in PlayerTab::ALL {
        let style = if tab == app.player.tab {
            theme::selected()
        } else {
            theme::muted()
        };
        spans.push(Span::styled(format!(" {} ", tab.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        format!("  Season {}", app.player.season),
        theme::neutral(),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ── Info ─────────────────────────────────────────────────────────────

fn render_info(f: &mut Frame, area: Rect, app: &AppState) {
    let view = &app.player;
    if let Some(p) = placeholder(&view.profile) {
        f.render_widget(p, area);
        return;
    }
    let Some(profile) = view.profile.ready() else {
        return;
    };

    let rows: Vec<(String, String)> = profile
        .info_rows()
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let mut lines = tables::key_values(&rows);
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("d", theme::accent_bold()),
        Span::styled("  season dashboard    ", theme::muted()),
        Span::styled("p", theme::accent_bold()),
        Span::styled("  season and career stats", theme::muted()),
    ]));
    f.render_widget(Paragraph::new(lines), area);
}

// ── Games ────────────────────────────────────────────────────────────

fn render_games(f: &mut Frame, area: Rect, app: &AppState) {
    let view = &app.player;
    let applied = view
        .opponent
        .as_ref()
        .map(|t| t.name.as_str())
        .unwrap_or("All opponents");
    let picker = Line::from(vec![
        Span::styled(" Opponent: ", theme::muted()),
        Span::styled(
            format!("< {} >", app.opponent_label(view.opponent_cursor)),
            theme::accent_bold(),
        ),
        Span::styled(format!("   showing: {applied}"), theme::neutral()),
    ]);

    let split_stats = match (&view.opponent, view.split.ready()) {
        (Some(_), Some(split)) => split.general_stats.as_ref(),
        _ => None,
    };
    let stats_height = split_stats.map_or(0, |s| s.table_rows().len() as u16 + 3);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(stats_height),
        ])
        .split(area);
    f.render_widget(Paragraph::new(picker), rows[0]);

    let slot_placeholder = if view.opponent.is_some() {
        placeholder(&view.split)
    } else {
        placeholder(&view.games)
    };
    if let Some(p) = slot_placeholder {
        f.render_widget(p, rows[1]);
        return;
    }

    let games = view.visible_games().unwrap_or(&[]);
    if games.is_empty() {
        let text = if view.opponent.is_some() {
            "No games found against this opponent."
        } else {
            "No games found for this season."
        };
        f.render_widget(message(text), rows[1]);
        return;
    }

    let table: Vec<Vec<String>> = games.iter().map(GameLog::table_row).collect();
    let lines = tables::grid(
        &GameLog::TABLE_COLUMNS,
        &table,
        None,
        view.scroll,
        rows[1].height as usize,
    );
    f.render_widget(Paragraph::new(lines), rows[1]);

    if let Some(stats) = split_stats {
        render_split_stats(f, rows[2], stats);
    }
}

fn render_split_stats(f: &mut Frame, area: Rect, stats: &GeneralStats) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(" General Stats ")
        .title_style(theme::panel_title(false));
    let inner = block.inner(area);
    f.render_widget(block, area);
    let lines = tables::grid(
        &GeneralStats::TABLE_COLUMNS,
        &stats.table_rows(),
        None,
        0,
        inner.height as usize,
    );
    f.render_widget(Paragraph::new(lines), inner);
}

// ── Probability ──────────────────────────────────────────────────────

/// The model form as text lines.
pub fn form_lines(app: &AppState) -> Vec<Line<'static>> {
    let form = &app.player.form;
    let mut model = vec![Span::styled(" Model:   ", theme::muted())];
    for kind in ModelKind::ALL {
        let style = if kind == form.kind {
            theme::selected()
        } else {
            theme::muted()
        };
        model.push(Span::styled(format!(" {} ", kind.label()), style));
        model.push(Span::raw(" "));
    }

    let mut lines = vec![
        Line::from(model),
        Line::from(vec![
            Span::styled(" Metric:  ", theme::muted()),
            Span::styled(form.metric.label().to_string(), theme::accent_bold()),
        ]),
    ];
    if let Some(label) = form.value_label() {
        lines.push(Line::from(vec![
            Span::styled(format!(" {label}: "), theme::muted()),
            Span::styled(format!("{}_", form.input), theme::text()),
        ]));
    }
    if form.kind == ModelKind::Gamlss {
        lines.push(Line::from(vec![
            Span::styled(" Family:  ", theme::muted()),
            Span::styled(form.gamlss_model.to_string(), theme::accent_bold()),
        ]));
    }
    lines
}

fn render_probability(f: &mut Frame, area: Rect, app: &AppState) {
    let form = form_lines(app);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form.len() as u16 + 1), Constraint::Min(3)])
        .split(area);
    f.render_widget(Paragraph::new(form), rows[0]);

    let body = rows[1];
    let view = &app.player;
    if matches!(view.prediction, Loadable::Idle) {
        f.render_widget(message("Press Enter to run the model."), body);
        return;
    }
    if let Some(p) = placeholder(&view.prediction) {
        f.render_widget(p, body);
        return;
    }
    if let Some(prediction) = view.prediction.ready() {
        render_prediction(f, body, prediction, view.form.metric.label());
    }
}

fn render_prediction(f: &mut Frame, area: Rect, prediction: &Prediction, metric: &str) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(20)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} ", prediction.kind().label()))
        .title_style(theme::panel_title(true));
    let inner = block.inner(cols[0]);
    f.render_widget(block, cols[0]);
    f.render_widget(Paragraph::new(tables::key_values(&prediction.summary_rows())), inner);

    let series = prediction.series();
    let right = if series.is_empty() {
        vec![cols[1]]
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(cols[1])
            .to_vec()
    };

    let bars = prediction.predicted_bars();
    f.render_widget(dashboard::value_chart(" Predicted ".to_string(), &bars), right[0]);
    if let Some(&slot) = right.get(1) {
        render_series(f, slot, series, metric);
    }
}

fn render_series(f: &mut Frame, area: Rect, series: &[f64], metric: &str) {
    let min_y = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max_y = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let padding = ((max_y - min_y).abs() * 0.05).max(0.5);
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = series.len().saturating_sub(1) as f64;

    let data: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();

    let dataset = Dataset::default()
        .name(metric.to_string())
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::panel_border(false))
                .title(" Per-game series ")
                .title_style(theme::panel_title(false)),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled("Game", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled("1", theme::muted()),
                    Span::styled(format!("{}", series.len()), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(fmt_num(min_y), theme::muted()),
                    Span::styled(fmt_num(max_y), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
